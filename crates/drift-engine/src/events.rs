/// Raw pointer event kinds delivered by the host UI layer. Mouse and
/// touch streams both map onto these four: down/start, move, up/end,
/// cancel/leave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}
