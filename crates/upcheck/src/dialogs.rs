use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use upcheck_core::{DialogButtons, DialogChoice, DialogKind, DialogRequest, Dialogs};

/// Native message boxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDialogs;

impl Dialogs for NativeDialogs {
    fn present(&self, request: &DialogRequest) -> DialogChoice {
        let result = MessageDialog::new()
            .set_level(message_level(request.kind))
            .set_title(request.title.as_str())
            .set_description(request.body.as_str())
            .set_buttons(message_buttons(request.buttons))
            .show();
        choice_from(request.buttons, &result)
    }
}

fn message_level(kind: DialogKind) -> MessageLevel {
    match kind {
        DialogKind::Info => MessageLevel::Info,
        DialogKind::Error => MessageLevel::Error,
    }
}

fn message_buttons(buttons: DialogButtons) -> MessageButtons {
    match buttons {
        DialogButtons::Ok => MessageButtons::Ok,
        DialogButtons::YesNo => MessageButtons::YesNo,
    }
}

fn choice_from(buttons: DialogButtons, result: &MessageDialogResult) -> DialogChoice {
    match (buttons, result) {
        (DialogButtons::Ok, _) => DialogChoice::Ok,
        (DialogButtons::YesNo, MessageDialogResult::Yes) => DialogChoice::Yes,
        (DialogButtons::YesNo, _) => DialogChoice::No,
    }
}

#[cfg(test)]
mod tests {
    use rfd::{MessageDialogResult, MessageLevel};
    use upcheck_core::{DialogButtons, DialogChoice, DialogKind};

    use super::{choice_from, message_level};

    #[test]
    fn dialog_kinds_map_to_matching_levels() {
        assert!(matches!(message_level(DialogKind::Info), MessageLevel::Info));
        assert!(matches!(message_level(DialogKind::Error), MessageLevel::Error));
    }

    #[test]
    fn only_explicit_yes_accepts() {
        assert_eq!(
            choice_from(DialogButtons::YesNo, &MessageDialogResult::Yes),
            DialogChoice::Yes
        );
        assert_eq!(
            choice_from(DialogButtons::YesNo, &MessageDialogResult::No),
            DialogChoice::No
        );
        assert_eq!(
            choice_from(DialogButtons::YesNo, &MessageDialogResult::Cancel),
            DialogChoice::No
        );
    }

    #[test]
    fn acknowledgement_dialogs_always_report_ok() {
        assert_eq!(
            choice_from(DialogButtons::Ok, &MessageDialogResult::Cancel),
            DialogChoice::Ok
        );
    }
}
