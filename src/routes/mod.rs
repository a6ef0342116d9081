/// Menu entries, keyed by the number the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    MarketData,
    SetAlert,
    CheckAlerts,
    Tip,
    Exit,
}

impl MenuChoice {
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::MarketData),
            "2" => Some(MenuChoice::SetAlert),
            "3" => Some(MenuChoice::CheckAlerts),
            "4" => Some(MenuChoice::Tip),
            "5" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}
