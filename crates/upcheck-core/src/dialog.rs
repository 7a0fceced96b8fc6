//! Modal dialog seam.
//!
//! The checker never talks to a windowing toolkit directly; it hands a
//! [`DialogRequest`] to a [`Dialogs`] implementation and blocks until the user
//! picks a button.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButtons {
    Ok,
    YesNo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    Ok,
    Yes,
    No,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    pub kind: DialogKind,
    pub title: String,
    pub body: String,
    pub buttons: DialogButtons,
}

pub trait Dialogs: Send + Sync {
    /// Show `request` modally and return the button the user pressed.
    /// Closing the dialog without choosing counts as `No` for yes/no prompts.
    fn present(&self, request: &DialogRequest) -> DialogChoice;
}
