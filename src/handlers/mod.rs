pub mod dashboard;
pub mod inventory;
#[cfg(test)]
mod tests;

pub use dashboard::{index, lab};
pub use inventory::{add_entry, admin, delete_entry, search};

/// One entry of the lab selector.
pub struct LabOption {
    pub value: i32,
    pub selected: bool,
}

/// Labs 1 to 10, with `selected` marked.
pub fn lab_options(selected: Option<i32>) -> Vec<LabOption> {
    (1..=10)
        .map(|value| LabOption { value, selected: selected == Some(value) })
        .collect()
}
