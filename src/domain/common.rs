use uuid::Uuid;

/// Records addressed by a stable id, such as roster entries.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// One-line label for shell output and logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}
