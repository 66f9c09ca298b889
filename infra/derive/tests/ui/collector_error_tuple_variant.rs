use collector_derive::collector_error;

#[collector_error]
pub enum DemoError {
    Io(std::io::Error),
}

fn main() {}
