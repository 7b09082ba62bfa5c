use crate::entities::DialogId;
use crate::menu::TriggerEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Navigation
    SelectNext,
    SelectPrevious,
    SelectDialog(DialogId),
    HoverDialog(Option<DialogId>),
    OpenDialog(DialogId),

    // Context menu
    ShowPopupMenu {
        dialog_id: DialogId,
        trigger: TriggerEvent,
    },
    MenuNext,
    MenuPrevious,
    MenuChoose(usize),
    MenuChooseHighlighted,
    DismissMenu,

    // UI operations
    ShowLogs(bool),
    LogsScrollUp,
    LogsScrollDown,
    CycleIcons,

    // App control
    Quit,
    None,
}
