use super::document::DocumentId;
use crate::app::controllers::timer::TickToken;

/// All messages that can be sent through the FLTK channel.
/// Menu items, the tab bar, the haiku panel and the timer each send one of
/// these; the dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    // File
    FileNew,
    FileOpen,
    FileSave,
    FileSaveAs,
    WindowClose,

    // Tabs
    TabCloseActive,
    TabNext,
    TabPrevious,
    TabSelect(DocumentId),
    ToggleTabs,

    // Editing
    BufferModified(DocumentId),
    ToggleHemingway,

    // Timer
    TimerStart,
    TimerReset,
    TimerTick(TickToken),

    // Quotes
    ShowQuote,

    // Haiku-gated deletion
    RequestDelete,
    HaikuLineEdited(usize, String),
    HaikuSubmit,
    HaikuCancel,
    HaikuDismiss,
}
