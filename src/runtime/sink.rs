use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
};

/// Where the interpreter's output bytes go.  Every output word funnels through here, one byte at
/// a time.
pub trait Sink {
    fn emit(&mut self, byte: u8) -> io::Result<()>;
}

/// Any byte consuming closure can act as a sink.
impl<F> Sink for F
where
    F: FnMut(u8),
{
    fn emit(&mut self, byte: u8) -> io::Result<()> {
        self(byte);
        Ok(())
    }
}

/// Write to the process's standard output.  The output is flushed at the end of every line so
/// that interactive output shows up promptly.
#[derive(Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> StdoutSink {
        StdoutSink
    }
}

impl Sink for StdoutSink {
    fn emit(&mut self, byte: u8) -> io::Result<()> {
        let mut stdout = io::stdout().lock();

        stdout.write_all(&[byte])?;

        if byte == b'\n' {
            stdout.flush()?;
        }

        Ok(())
    }
}

/// Collect the output in memory.  Clones share the same buffer, so one copy can be handed to the
/// interpreter while another is kept to read back what was written.
#[derive(Clone, Default)]
pub struct OutputBuffer(Rc<RefCell<Vec<u8>>>);

impl OutputBuffer {
    pub fn new() -> OutputBuffer {
        OutputBuffer::default()
    }

    /// A copy of everything written so far.
    pub fn bytes(&self) -> Vec<u8> {
        self.0.borrow().clone()
    }

    /// Everything written so far, with any invalid UTF-8 replaced.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    /// Hand back everything written so far and empty the buffer.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.0.borrow_mut());

        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Sink for OutputBuffer {
    fn emit(&mut self, byte: u8) -> io::Result<()> {
        self.0.borrow_mut().push(byte);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_buffer() {
        let buffer = OutputBuffer::new();
        let mut writer = buffer.clone();

        for byte in b"ok\n" {
            writer.emit(*byte).unwrap();
        }

        assert_eq!(buffer.contents(), "ok\n");
        assert_eq!(buffer.take(), "ok\n");
        assert!(buffer.bytes().is_empty());
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();

        {
            let mut sink = |byte: u8| seen.push(byte);
            sink.emit(b'x').unwrap();
        }

        assert_eq!(seen, vec![b'x']);
    }
}
