use crate::routing::Route;

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Exit,
    InsertChar(char),
    DeleteChar,
    ClearSearch,
    SetSearch(String),
    SelectNext,
    SelectPrev,
    OpenSelected,
    OpenProduct(usize),
    NextPage,
    PrevPage,
    GoToPage(usize),
    Scroll(isize),
    OpenRoute(Route),
    Back,
    Forward,
    Reload,
    Noop,
}
