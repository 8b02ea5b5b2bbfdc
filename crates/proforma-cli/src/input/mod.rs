pub mod file;
pub mod stdin;

use proforma_core::assumptions::PropertyAssumptions;

/// Read an assumptions record from `--input <path>` or piped stdin JSON.
pub fn read_assumptions(
    path: &Option<String>,
) -> Result<PropertyAssumptions, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        file::read_document(path)
    } else if let Some(data) = stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        Err("--input <file.{json,yaml}> or piped stdin JSON required".into())
    }
}
