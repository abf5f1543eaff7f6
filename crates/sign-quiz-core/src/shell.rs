use crate::error::Error;
use crate::screen::Screen;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A user-visible message. Every recovered failure ends up as one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// The presentation layer the engine drives.
///
/// A terminal shell implements this with colored text; tests record calls.
/// Input flows the other way, through `QuizEngine::submit` and `QuizEngine::navigate`.
pub trait Shell {
    /// Opaque displayable handle. The engine caches one per path.
    type Image;

    fn load_image(&mut self, path: &Path) -> Result<Self::Image, Error>;
    fn render(&mut self, screen: &Screen, image: Option<&Self::Image>);
    fn notify(&mut self, _notice: &Notice) {}
}

/// Shell that draws nothing, for headless operation.
pub struct SilentShell;

impl Shell for SilentShell {
    type Image = PathBuf;

    fn load_image(&mut self, path: &Path) -> Result<PathBuf, Error> {
        Ok(path.to_path_buf())
    }

    fn render(&mut self, _screen: &Screen, _image: Option<&PathBuf>) {}
}
