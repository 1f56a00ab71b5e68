use std::io::{self, BufRead, Write};

/// Where commands come from and where replies go.
pub trait Console {
    /// Shows `prompt` and reads one line. `None` means the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// A console over any line-oriented reader and writer: the terminal, a script
/// file or an in-memory buffer.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
    echo: bool,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            echo: false,
        }
    }

    /// Repeats every line read after its prompt, so a transcript of a
    /// scripted session reads like an interactive one.
    pub fn echoing(mut self) -> Self {
        self.echo = true;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        // Raw bytes: a line that is not UTF-8 is still a line.
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf)
            .trim_end_matches(['\r', '\n'])
            .to_string();
        if self.echo {
            writeln!(self.output, "{line}")?;
        }
        Ok(Some(line))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_until_exhausted() {
        let mut console = LineConsole::new("show\r\nexit\n".as_bytes(), Vec::new());

        assert_eq!(Some("show".to_string()), console.read_line("$: ").unwrap());
        assert_eq!(Some("exit".to_string()), console.read_line("$: ").unwrap());
        assert_eq!(None, console.read_line("$: ").unwrap());
        assert_eq!("$: $: $: \n", String::from_utf8(console.into_output()).unwrap());
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut console = LineConsole::new(&b"caf\xe9\nshow\n"[..], Vec::new());

        assert_eq!(Some("caf\u{fffd}".to_string()), console.read_line("$: ").unwrap());
        assert_eq!(Some("show".to_string()), console.read_line("$: ").unwrap());
    }

    #[test]
    fn test_echo() {
        let mut console = LineConsole::new("help".as_bytes(), Vec::new()).echoing();

        console.read_line("$: ").unwrap();
        console.write_line("ok").unwrap();
        assert_eq!("$: help\nok\n", String::from_utf8(console.into_output()).unwrap());
    }
}
