use std::io::{self, Write};
use std::process::ExitCode;

use strbuf::collections::contiguous::ByteBuffer;
use strbuf::source::ReaderSource;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut source = ReaderSource::new(io::stdin().lock());
    let mut stdout = io::stdout().lock();
    let mut line_no = 0_usize;

    loop {
        let mut line = ByteBuffer::new();

        match line.try_fill_until(&mut source, b'\n') {
            Ok(0) => break,
            Ok(consumed) => debug!(line_no, consumed, "read line"),
            Err(err) => {
                error!(line_no, %err, "failed to read line");
                return ExitCode::FAILURE;
            },
        }

        let view = line.as_terminated_view();
        if let Err(err) = writeln!(stdout, "{:>4} [{:>3}] {:?}", line_no, view.len(), view) {
            error!(%err, "failed to write to stdout");
            return ExitCode::FAILURE;
        }

        line.destroy();
        line_no += 1;
    }

    debug!(lines = line_no, "reached end of input");
    ExitCode::SUCCESS
}
