use askama::Result;
use serde::Serialize;

// Serializes chart data for `<script type="application/json">` blocks.
// Use as `{{ series|to_json|safe }}`; `</` is escaped so the payload cannot
// close the surrounding script element.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value).map_err(|error| askama::Error::Custom(Box::new(error)))?;
    Ok(json.replace("</", "<\\/"))
}
