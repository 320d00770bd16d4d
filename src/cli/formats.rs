//! Formats command implementation.

use crate::codec::FormatRegistry;
use crate::error::Result;
use crate::output::Printer;

pub fn run(printer: &Printer) -> Result<()> {
    let registry = FormatRegistry::with_builtins();

    for format in registry.formats() {
        let mut line = format
            .extensions
            .iter()
            .map(|e| format!(".{}", e))
            .collect::<Vec<_>>()
            .join(", ");
        if !format.options.is_empty() {
            line.push_str(&printer.dim(&format!("  options: {}", format.options.join(", "))));
        }
        printer.info(format.name, &line);
    }

    Ok(())
}
