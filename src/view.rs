use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Tracker,
    History,
    Report,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Tracker, Tab::History, Tab::Report];

    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Tracker => "tracker",
            Tab::History => "history",
            Tab::Report => "report",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Tracker => "기록하기",
            Tab::History => "모아보기",
            Tab::Report => "보고서",
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "tracker" => Ok(Tab::Tracker),
            "history" => Ok(Tab::History),
            "report" => Ok(Tab::Report),
            other => Err(format!("unknown tab '{other}'")),
        }
    }
}

/// Which view currently has control. Any tab is reachable from any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewRouter {
    active: Tab,
}

impl ViewRouter {
    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn select(&mut self, tab: Tab) {
        self.active = tab;
    }

    /// Applies a raw tab selection; unknown names leave the current tab.
    pub fn select_named(&mut self, name: &str) {
        if let Ok(tab) = name.parse() {
            self.select(tab);
        }
    }
}
