//! This example prints the trailer and every indirect object of a PDF file.
//!
//! Stream data is decoded and summarized by its length. Run it with `--features logging` to see
//! warnings about malformed structures on stderr.

use pdfscope_syntax::{Document, IndirectValue};
use std::env;
use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    #[cfg(feature = "logging")]
    if let Ok(()) = log::set_logger(&LOGGER) {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let target = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("test.pdf"));

    let doc = Document::parse(std::fs::read(target)?)?;

    println!("header: {}", doc.header());

    if let Some(version) = doc.version() {
        println!("version: {version}");
    }

    println!("startxref: {}", doc.xref_offset());
    println!(
        "trailer: {}",
        pdfscope_syntax::Object::Dict(doc.trailer().clone())
    );
    println!();

    for entry in doc.entries() {
        let value = match entry.value(&doc) {
            Ok(value) => value,
            Err(e) => {
                println!("{} obj: error ({:?}): {e}", entry.id(), e.kind());
                continue;
            }
        };

        println!("{} obj {:?}", entry.id(), entry.location());
        println!("  {value}");

        if let IndirectValue::Stream(stream) = value {
            match stream.decoded(Some(&doc)) {
                Ok(decoded) => println!(
                    "  {} bytes ({})",
                    decoded.data.len(),
                    decoded.algorithm
                ),
                Err(e) => println!("  undecodable stream: {e}"),
            }
        }
    }

    Ok(())
}

#[cfg(feature = "logging")]
static LOGGER: SimpleLogger = SimpleLogger;

#[cfg(feature = "logging")]
struct SimpleLogger;

#[cfg(feature = "logging")]
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::LevelFilter::Debug
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}
