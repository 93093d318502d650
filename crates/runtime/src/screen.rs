/// Full-page views of the wizard, in forward order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Home,
    Curriculum,
    Grade,
    Subject,
    Chapter,
}

impl ScreenId {
    pub const ALL: [ScreenId; 5] = [
        ScreenId::Home,
        ScreenId::Curriculum,
        ScreenId::Grade,
        ScreenId::Subject,
        ScreenId::Chapter,
    ];

    /// Element id of the screen container.
    pub fn dom_id(self) -> &'static str {
        match self {
            ScreenId::Home => "s-home",
            ScreenId::Curriculum => "s-curriculum",
            ScreenId::Grade => "s-grade",
            ScreenId::Subject => "s-subject",
            ScreenId::Chapter => "s-chapter",
        }
    }
}

/// Exactly one screen is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenController {
    active: ScreenId,
}

impl Default for ScreenController {
    fn default() -> Self {
        Self {
            active: ScreenId::Home,
        }
    }
}

impl ScreenController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> ScreenId {
        self.active
    }

    pub fn is_active(&self, id: ScreenId) -> bool {
        self.active == id
    }

    pub fn show(&mut self, id: ScreenId) {
        self.active = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_home() {
        assert_eq!(ScreenController::new().active(), ScreenId::Home);
    }

    #[test]
    fn show_activates_exactly_one() {
        let mut screens = ScreenController::new();
        screens.show(ScreenId::Grade);
        let active: Vec<_> = ScreenId::ALL
            .into_iter()
            .filter(|id| screens.is_active(*id))
            .collect();
        assert_eq!(active, vec![ScreenId::Grade]);
    }

    #[test]
    fn dom_ids_are_unique() {
        let mut ids: Vec<_> = ScreenId::ALL.iter().map(|s| s.dom_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), ScreenId::ALL.len());
    }
}
