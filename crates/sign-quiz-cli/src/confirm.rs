use std::io::{self, BufRead, Write};

/// Ask a yes/no question on stdin. Anything but an explicit yes is a no.
pub fn prompt_confirm(prompt: &str) -> io::Result<bool> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    confirm(prompt, &mut stdin.lock(), &mut stdout.lock())
}

/// Unrecognized replies re-ask; an empty reply or end of input declines.
pub fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, out: &mut W) -> io::Result<bool> {
    let mut reply = String::new();
    loop {
        write!(out, "{} (y/N): ", prompt)?;
        out.flush()?;

        reply.clear();
        if input.read_line(&mut reply)? == 0 {
            writeln!(out)?;
            return Ok(false);
        }
        match reply.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "" | "n" | "no" => return Ok(false),
            other => writeln!(out, "Please answer y or n, not '{}'.", other)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(typed: &str) -> (bool, String) {
        let mut out = Vec::new();
        let confirmed = confirm("Delete Ola?", &mut Cursor::new(typed), &mut out).unwrap();
        (confirmed, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_yes_and_no() {
        assert!(answer("y\n").0);
        assert!(answer(" YES \n").0);
        assert!(!answer("n\n").0);
        assert!(!answer("\n").0);
    }

    #[test]
    fn test_unrecognized_reply_asks_again() {
        let (confirmed, out) = answer("kanskje\ny\n");
        assert!(confirmed);
        assert_eq!(out.matches("Delete Ola? (y/N): ").count(), 2);
        assert!(out.contains("'kanskje'"));
    }

    #[test]
    fn test_end_of_input_declines() {
        assert!(!answer("").0);
        assert!(!answer("what").0);
    }
}
