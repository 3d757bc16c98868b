//! Parameter-name normalization
//!
//! User-supplied labels become the machine names the backend keys its
//! extraction results by, so they are normalized once here and nowhere
//! else: lowercase, non-alphanumeric runs collapsed to single
//! underscores, no leading or trailing underscores.

/// Normalize a user-supplied parameter label into a stable machine name.
///
/// # Examples
/// ```
/// use regionpdf_core::naming::normalize_parameter_name;
///
/// assert_eq!(normalize_parameter_name("Patient Name"), "patient_name");
/// assert_eq!(normalize_parameter_name("  Total (USD)  "), "total_usd");
/// ```
pub fn normalize_parameter_name(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_separator = false;

    for c in label.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            // Lowercasing can expand to multiple chars; combining marks
            // produced that way are dropped to keep the name plain.
            for lower in c.to_lowercase() {
                if lower.is_alphanumeric() {
                    out.push(lower);
                }
            }
        } else {
            pending_separator = true;
        }
    }

    out
}
