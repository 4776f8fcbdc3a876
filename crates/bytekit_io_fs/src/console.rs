//! Line and token reading over any `BufRead`/`Write` pair.

use std::io::{BufRead, Write};

use crate::spec::ConsoleError;

/// Prompt until a line equal to `token` is read.
///
/// Returns how many lines were rejected before the token arrived. Trailing
/// `\n` / `\r\n` are stripped before comparing; no other trimming happens.
pub fn wait_for_token<R, W>(reader: &mut R, writer: &mut W, token: &str) -> Result<u64, ConsoleError>
where
    R: BufRead,
    W: Write,
{
    write!(writer, "Enter \"{token}\" to continue: ")?;
    writer.flush()?;

    let mut n_rejected: u64 = 0;
    let mut c_line = String::new();
    loop {
        c_line.clear();
        if reader.read_line(&mut c_line)? == 0 {
            return Err(ConsoleError::UnexpectedEof);
        }
        if trim_line_ending(&c_line) == token {
            return Ok(n_rejected);
        }
        n_rejected += 1;
        tracing::debug!(n_rejected, "token mismatch");
        write!(writer, "Did not enter \"{token}\". Try again: ")?;
        writer.flush()?;
    }
}

/// Read the next integer token.
///
/// Blank lines are skipped. The first whitespace-separated token of the
/// first non-blank line is parsed; the rest of that line is discarded.
pub fn read_integer<R>(reader: &mut R) -> Result<i64, ConsoleError>
where
    R: BufRead,
{
    let mut c_line = String::new();
    loop {
        c_line.clear();
        if reader.read_line(&mut c_line)? == 0 {
            return Err(ConsoleError::UnexpectedEof);
        }
        let Some(c_token) = c_line.split_whitespace().next() else {
            continue;
        };
        return c_token
            .parse::<i64>()
            .map_err(|_| ConsoleError::InputFormat {
                input: c_token.to_string(),
            });
    }
}

/// Prompt for an integer, re-prompting on malformed input.
///
/// Gives up with the last [`ConsoleError::InputFormat`] after
/// `n_attempts_max` failed attempts (`None` = never). EOF and IO errors
/// are returned immediately.
pub fn prompt_integer<R, W>(
    reader: &mut R,
    writer: &mut W,
    c_prompt: &str,
    n_attempts_max: Option<u32>,
) -> Result<i64, ConsoleError>
where
    R: BufRead,
    W: Write,
{
    let mut n_attempts: u32 = 0;
    loop {
        write!(writer, "{c_prompt}")?;
        writer.flush()?;
        match read_integer(reader) {
            Ok(n) => return Ok(n),
            Err(e @ ConsoleError::InputFormat { .. }) => {
                n_attempts += 1;
                writeln!(writer, "{e}")?;
                if n_attempts_max.is_some_and(|n_max| n_attempts >= n_max) {
                    return Err(e);
                }
            }
            Err(e) => return Err(e),
        }
    }
}

/// Split `text` into whitespace-separated tokens.
pub fn split_tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

fn trim_line_ending(c_line: &str) -> &str {
    let c_line = c_line.strip_suffix('\n').unwrap_or(c_line);
    c_line.strip_suffix('\r').unwrap_or(c_line)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{prompt_integer, read_integer, split_tokens, wait_for_token};
    use crate::spec::ConsoleError;

    #[test]
    fn wait_for_token_counts_rejections() {
        let mut reader = Cursor::new("go\nstart \nstart\r\nignored\n");
        let mut raw_out = Vec::new();

        let n_rejected = wait_for_token(&mut reader, &mut raw_out, "start").expect("token");
        assert_eq!(n_rejected, 2);
        let txt = String::from_utf8(raw_out).expect("utf8");
        assert!(txt.starts_with("Enter \"start\" to continue: "));
        assert_eq!(txt.matches("Try again").count(), 2);
    }

    #[test]
    fn wait_for_token_eof_is_error() {
        let mut reader = Cursor::new("nope\n");
        let res = wait_for_token(&mut reader, &mut Vec::new(), "start");
        assert!(matches!(res, Err(ConsoleError::UnexpectedEof)));
    }

    #[test]
    fn read_integer_skips_blank_lines() {
        let mut reader = Cursor::new("\n   \n  -42 rest\n");
        assert_eq!(read_integer(&mut reader).expect("int"), -42);
    }

    #[test]
    fn read_integer_malformed_is_recoverable() {
        let mut reader = Cursor::new("abc\n7\n");
        let res = read_integer(&mut reader);
        assert!(matches!(res, Err(ConsoleError::InputFormat { ref input }) if input == "abc"));
        assert_eq!(read_integer(&mut reader).expect("int"), 7);
    }

    #[test]
    fn prompt_integer_reprompts_until_valid() {
        let mut reader = Cursor::new("x\n1.5\n99\n");
        let mut raw_out = Vec::new();

        let n = prompt_integer(&mut reader, &mut raw_out, "code: ", None).expect("int");
        assert_eq!(n, 99);
        let txt = String::from_utf8(raw_out).expect("utf8");
        assert_eq!(txt.matches("code: ").count(), 3);
        assert!(txt.contains("Not an integer: `1.5`"));
    }

    #[test]
    fn prompt_integer_gives_up_after_max_attempts() {
        let mut reader = Cursor::new("x\ny\n5\n");
        let res = prompt_integer(&mut reader, &mut Vec::new(), "code: ", Some(2));
        assert!(matches!(res, Err(ConsoleError::InputFormat { ref input }) if input == "y"));
    }

    #[test]
    fn split_tokens_on_whitespace() {
        assert_eq!(
            split_tokens("Hello, How  are\tyou?"),
            vec!["Hello,", "How", "are", "you?"]
        );
        assert!(split_tokens("   ").is_empty());
    }
}
