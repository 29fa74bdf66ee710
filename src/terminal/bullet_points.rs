pub struct BulletPointPrinter<W: LineWriter + Clone> {
    writer: W,
}

impl<W: LineWriter + Clone> BulletPointPrinter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn print_line(&self, message: impl std::fmt::Display) {
        self.writer.write_line(&message.to_string());
    }

    pub fn print_item(&self, message: impl std::fmt::Display) {
        self.writer.write_line(&format!("• {}", message));
    }
}

impl BulletPointPrinter<StdoutLineWriter> {
    pub fn new_stdout() -> Self {
        Self::new(StdoutLineWriter)
    }
}

pub trait LineWriter {
    fn write_line(&self, line: &str);
}

#[derive(Clone, Copy)]
pub struct StdoutLineWriter;
impl LineWriter for StdoutLineWriter {
    fn write_line(&self, line: &str) {
        println!("{}", line);
    }
}
