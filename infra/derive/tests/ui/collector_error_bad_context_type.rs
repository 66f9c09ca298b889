use collector_derive::collector_error;

#[collector_error]
pub enum DemoError {
    Io { source: std::io::Error, context: Option<String> },
}

fn main() {}
