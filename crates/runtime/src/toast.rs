use foundation::{TimeMs, TimeSpan};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Info,
    Ok,
    Err,
}

impl ToastKind {
    /// Extra CSS class on the toast element.
    pub fn css_class(self) -> &'static str {
        match self {
            ToastKind::Info => "",
            ToastKind::Ok => "ok",
            ToastKind::Err => "err",
        }
    }

    pub fn parse(kind: &str) -> Self {
        match kind.trim() {
            "ok" => ToastKind::Ok,
            "err" => ToastKind::Err,
            _ => ToastKind::Info,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ToastTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub shown: TimeSpan,
    ticket: ToastTicket,
}

/// Single-slot notifier: the latest message always wins and owns the full
/// display duration from its own show time.
#[derive(Debug, Clone)]
pub struct Toaster {
    duration_ms: u32,
    current: Option<Toast>,
    last_ticket: u64,
}

impl Toaster {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            current: None,
            last_ticket: 0,
        }
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Replaces whatever is showing. The caller schedules `expire(ticket)`
    /// after `duration_ms` and drops any earlier pending hide.
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind, now: TimeMs) -> ToastTicket {
        self.last_ticket += 1;
        let ticket = ToastTicket(self.last_ticket);
        self.current = Some(Toast {
            message: message.into(),
            kind,
            shown: TimeSpan::starting_at(now, self.duration_ms),
            ticket,
        });
        ticket
    }

    /// Hide timer fired. Returns whether the toast was hidden; superseded
    /// tickets are ignored.
    pub fn expire(&mut self, ticket: ToastTicket) -> bool {
        match &self.current {
            Some(t) if t.ticket == ticket => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn visible_at(&self, now: TimeMs) -> Option<&Toast> {
        self.current.as_ref().filter(|t| t.shown.contains(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_toast_preempts_first_and_gets_full_duration() {
        let mut toaster = Toaster::new(3000);
        let first = toaster.show("Uploading", ToastKind::Info, TimeMs(0.0));
        let second = toaster.show("Upload failed", ToastKind::Err, TimeMs(1200.0));

        // The first hide fires at t=3000 and must not touch the second toast.
        assert!(!toaster.expire(first));
        let shown = toaster.visible_at(TimeMs(3000.0)).unwrap();
        assert_eq!(shown.message, "Upload failed");
        assert!(toaster.visible_at(TimeMs(4199.0)).is_some());
        assert!(toaster.visible_at(TimeMs(4200.0)).is_none());

        assert!(toaster.expire(second));
        assert!(toaster.current().is_none());
    }

    #[test]
    fn only_latest_message_is_ever_visible() {
        let mut toaster = Toaster::new(3000);
        toaster.show("a", ToastKind::Ok, TimeMs(0.0));
        toaster.show("b", ToastKind::Ok, TimeMs(10.0));
        assert_eq!(toaster.current().unwrap().message, "b");
    }

    #[test]
    fn kind_parsing_defaults_to_info() {
        assert_eq!(ToastKind::parse("err"), ToastKind::Err);
        assert_eq!(ToastKind::parse(""), ToastKind::Info);
        assert_eq!(ToastKind::Ok.css_class(), "ok");
    }
}
