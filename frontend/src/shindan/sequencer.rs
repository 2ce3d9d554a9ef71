//! Step sequencing and answer collection for the diagnosis chat.
//!
//! The whole flow is a five-step linear script. State only moves through
//! [`reduce`], which is a pure function so the transition table can be
//! exercised without a browser. Timers are not owned here: a state merely
//! records the one advance it is waiting for (`pending`), and the page turns
//! that into a real `Timeout`.

use std::rc::Rc;

use yew::functional::Reducible;

use super::answers::{can_proceed, sanitize_amount, Amount};

/// Delay between mount and the first question.
pub const GREETING_DELAY_MS: u32 = 1200;
/// Delay after a category has been picked.
pub const SELECT_DELAY_MS: u32 = 400;
/// Delay after an amount has been submitted.
pub const SUBMIT_DELAY_MS: u32 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Greeting = 0,
    Category = 1,
    CurrentAssets = 2,
    TargetAssets = 3,
    Result = 4,
}

impl Step {
    #[cfg(test)]
    pub const ALL: [Step; 5] = [
        Step::Greeting,
        Step::Category,
        Step::CurrentAssets,
        Step::TargetAssets,
        Step::Result,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    /// The following step. `Result` is terminal and maps to itself.
    pub fn next(self) -> Step {
        match self {
            Step::Greeting => Step::Category,
            Step::Category => Step::CurrentAssets,
            Step::CurrentAssets => Step::TargetAssets,
            Step::TargetAssets => Step::Result,
            Step::Result => Step::Result,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Step::Result
    }
}

/// Where the visitor mainly invests. Single choice out of a fixed list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    IndexFund,
    Accumulation,
    IndividualStocks,
    RealEstate,
    Bonds,
    Forex,
    Crypto,
    NotStarted,
}

impl Category {
    /// Display order of the options.
    pub const ALL: [Category; 8] = [
        Category::IndexFund,
        Category::Accumulation,
        Category::IndividualStocks,
        Category::RealEstate,
        Category::Bonds,
        Category::Forex,
        Category::Crypto,
        Category::NotStarted,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::IndexFund => "インデックス投資",
            Category::Accumulation => "積立投資",
            Category::IndividualStocks => "個別株",
            Category::RealEstate => "不動産",
            Category::Bonds => "債券",
            Category::Forex => "FX",
            Category::Crypto => "仮想通貨",
            Category::NotStarted => "まだ始めていない",
        }
    }
}

/// The three answers collected by the chat. Amounts are in 万円.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnswerRecord {
    pub category: Option<Category>,
    pub current_assets: Option<Amount>,
    pub target_assets: Option<Amount>,
}

/// An advance the state is waiting on. Only one can be outstanding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingAdvance {
    pub from: Step,
    pub delay_ms: u32,
    pub ticket: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A scheduled delay elapsed. Carries the ticket it was scheduled with.
    AutoAdvance { ticket: u32 },
    SelectCategory(Category),
    EditCurrentAssets(String),
    SubmitCurrentAssets(String),
    EditTargetAssets(String),
    SubmitTargetAssets(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShindanState {
    pub step: Step,
    pub answers: AnswerRecord,
    pub pending: Option<PendingAdvance>,
    next_ticket: u32,
}

impl Default for ShindanState {
    /// Greeting shown, first question already scheduled.
    fn default() -> Self {
        ShindanState {
            step: Step::Greeting,
            answers: AnswerRecord::default(),
            pending: None,
            next_ticket: 0,
        }
        .schedule(GREETING_DELAY_MS)
    }
}

impl ShindanState {
    fn schedule(mut self, delay_ms: u32) -> Self {
        self.pending = Some(PendingAdvance {
            from: self.step,
            delay_ms,
            ticket: self.next_ticket,
        });
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self
    }

    /// Whether the current question still accepts input.
    fn accepts_input_at(&self, step: Step) -> bool {
        self.step == step && self.pending.is_none()
    }

    /// True while an advance is scheduled; the current control is frozen.
    pub fn is_locked(&self) -> bool {
        self.pending.is_some()
    }

    pub fn can_submit_current(&self) -> bool {
        self.accepts_input_at(Step::CurrentAssets) && can_proceed(self.answers.current_assets.as_ref())
    }

    pub fn can_submit_target(&self) -> bool {
        self.accepts_input_at(Step::TargetAssets) && can_proceed(self.answers.target_assets.as_ref())
    }
}

/// Applies one event. Never moves the step backwards; only a matching
/// `AutoAdvance` moves it forwards, by exactly one.
pub fn reduce(state: &ShindanState, event: Event) -> ShindanState {
    if state.step.is_terminal() {
        return state.clone();
    }

    let mut next = state.clone();
    match event {
        Event::AutoAdvance { ticket } => match state.pending {
            Some(p) if p.ticket == ticket && p.from == state.step => {
                next.step = state.step.next();
                next.pending = None;
                log::debug!("shindan step {:?} -> {:?}", state.step, next.step);
            }
            _ => log::debug!("ignoring stale advance ticket {}", ticket),
        },
        Event::SelectCategory(category) => {
            if state.step != Step::Category {
                return next;
            }
            next.answers.category = Some(category);
            if state.pending.is_none() {
                next = next.schedule(SELECT_DELAY_MS);
            }
        }
        Event::EditCurrentAssets(raw) => {
            if state.accepts_input_at(Step::CurrentAssets) {
                next.answers.current_assets = sanitize_amount(&raw);
            }
        }
        Event::EditTargetAssets(raw) => {
            if state.accepts_input_at(Step::TargetAssets) {
                next.answers.target_assets = sanitize_amount(&raw);
            }
        }
        Event::SubmitCurrentAssets(raw) => {
            if state.accepts_input_at(Step::CurrentAssets) {
                next.answers.current_assets = sanitize_amount(&raw);
                if can_proceed(next.answers.current_assets.as_ref()) {
                    next = next.schedule(SUBMIT_DELAY_MS);
                }
            }
        }
        Event::SubmitTargetAssets(raw) => {
            if state.accepts_input_at(Step::TargetAssets) {
                next.answers.target_assets = sanitize_amount(&raw);
                if can_proceed(next.answers.target_assets.as_ref()) {
                    next = next.schedule(SUBMIT_DELAY_MS);
                }
            }
        }
    }
    next
}

impl Reducible for ShindanState {
    type Action = Event;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = reduce(&self, action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fire(state: &ShindanState) -> ShindanState {
        let ticket = state.pending.expect("an advance should be pending").ticket;
        reduce(state, Event::AutoAdvance { ticket })
    }

    fn at_step(step: Step) -> ShindanState {
        let mut s = fire(&ShindanState::default());
        if step >= Step::CurrentAssets {
            s = fire(&reduce(&s, Event::SelectCategory(Category::Bonds)));
        }
        if step >= Step::TargetAssets {
            s = fire(&reduce(&s, Event::SubmitCurrentAssets("10".into())));
        }
        if step >= Step::Result {
            s = fire(&reduce(&s, Event::SubmitTargetAssets("20".into())));
        }
        assert_eq!(s.step, step);
        s
    }

    #[test]
    fn starts_at_greeting_with_mount_delay_pending() {
        let s = ShindanState::default();
        assert_eq!(s.step, Step::Greeting);
        let p = s.pending.unwrap();
        assert_eq!(p.from, Step::Greeting);
        assert_eq!(p.delay_ms, GREETING_DELAY_MS);
        assert_eq!(s.answers, AnswerRecord::default());
    }

    #[test]
    fn greeting_advances_unconditionally() {
        let s = fire(&ShindanState::default());
        assert_eq!(s.step, Step::Category);
        assert!(s.pending.is_none());
    }

    #[test]
    fn selecting_category_stores_label_and_schedules_once() {
        let s = at_step(Step::Category);
        let s = reduce(&s, Event::SelectCategory(Category::Crypto));
        assert_eq!(s.answers.category, Some(Category::Crypto));
        assert_eq!(s.step, Step::Category);
        let first = s.pending.unwrap();
        assert_eq!(first.delay_ms, SELECT_DELAY_MS);

        let s = reduce(&s, Event::SelectCategory(Category::Forex));
        assert_eq!(s.answers.category.map(Category::label), Some("FX"));
        assert_eq!(s.pending, Some(first));

        let s = fire(&s);
        assert_eq!(s.step, Step::CurrentAssets);
        assert!(s.pending.is_none());
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let s = at_step(Step::Category);
        let s = reduce(&s, Event::SelectCategory(Category::Bonds));
        let ticket = s.pending.unwrap().ticket;
        let stale = reduce(&s, Event::AutoAdvance { ticket: ticket.wrapping_add(7) });
        assert_eq!(stale, s);

        let advanced = reduce(&s, Event::AutoAdvance { ticket });
        let replay = reduce(&advanced, Event::AutoAdvance { ticket });
        assert_eq!(replay.step, Step::CurrentAssets);
    }

    #[test]
    fn auto_advance_without_pending_is_noop() {
        let s = at_step(Step::CurrentAssets);
        assert_eq!(reduce(&s, Event::AutoAdvance { ticket: 0 }), s);
    }

    #[test]
    fn submit_with_unset_amount_does_nothing() {
        let s = at_step(Step::CurrentAssets);
        let s = reduce(&s, Event::SubmitCurrentAssets("abc".into()));
        assert_eq!(s.step, Step::CurrentAssets);
        assert!(s.pending.is_none());
        assert_eq!(s.answers.current_assets, None);
        assert!(!s.can_submit_current());
    }

    #[test]
    fn submit_zero_is_accepted() {
        let s = at_step(Step::CurrentAssets);
        let s = reduce(&s, Event::EditCurrentAssets("0".into()));
        assert!(s.can_submit_current());
        let s = reduce(&s, Event::SubmitCurrentAssets("0".into()));
        assert_eq!(s.pending.unwrap().delay_ms, SUBMIT_DELAY_MS);
        let s = fire(&s);
        assert_eq!(s.step, Step::TargetAssets);
        assert_eq!(s.answers.current_assets, Some(Amount::from(0)));
    }

    #[test]
    fn edits_strip_non_digits() {
        let s = at_step(Step::TargetAssets);
        let s = reduce(&s, Event::EditTargetAssets("12a3b".into()));
        assert_eq!(s.answers.target_assets, Some(Amount::from(123)));
        let s = reduce(&s, Event::EditTargetAssets("".into()));
        assert_eq!(s.answers.target_assets, None);
    }

    #[test]
    fn input_for_other_questions_is_ignored() {
        let s = at_step(Step::CurrentAssets);
        let after = reduce(&s, Event::EditTargetAssets("5".into()));
        assert_eq!(after, s);
        let after = reduce(&s, Event::SelectCategory(Category::RealEstate));
        assert_eq!(after, s);
    }

    #[test]
    fn edits_are_frozen_once_submitted() {
        let s = at_step(Step::CurrentAssets);
        let s = reduce(&s, Event::SubmitCurrentAssets("50".into()));
        let s = reduce(&s, Event::EditCurrentAssets("9999".into()));
        assert_eq!(s.answers.current_assets, Some(Amount::from(50)));
        let pending = s.pending;
        let s = reduce(&s, Event::SubmitCurrentAssets("1".into()));
        assert_eq!(s.pending, pending);
    }

    #[test]
    fn submitted_amount_locks_the_field_until_the_advance() {
        let s = at_step(Step::TargetAssets);
        assert!(!s.is_locked());
        let s = reduce(&s, Event::SubmitTargetAssets("800".into()));
        assert!(s.is_locked());
        assert!(!s.can_submit_target());

        let typed = reduce(&s, Event::EditTargetAssets("8001".into()));
        assert_eq!(typed.answers.target_assets, Some(Amount::from(800)));

        let s = fire(&s);
        assert!(!s.is_locked());
        assert_eq!(s.step, Step::Result);
    }

    #[test]
    fn very_long_amount_can_proceed() {
        let s = at_step(Step::CurrentAssets);
        let s = reduce(&s, Event::EditCurrentAssets("18446744073709551616".into()));
        assert!(s.can_submit_current());
        let s = fire(&reduce(&s, Event::SubmitCurrentAssets("18446744073709551616".into())));
        assert_eq!(s.step, Step::TargetAssets);
        assert_eq!(
            s.answers.current_assets.as_ref().map(Amount::digits),
            Some("18446744073709551616")
        );
    }

    #[test]
    fn full_flow_collects_all_answers() {
        let s = at_step(Step::Result);
        assert_eq!(
            s.answers,
            AnswerRecord {
                category: Some(Category::Bonds),
                current_assets: Some(Amount::from(10)),
                target_assets: Some(Amount::from(20)),
            }
        );
        assert!(s.pending.is_none());
    }

    #[test]
    fn terminal_state_absorbs_every_event() {
        let s = at_step(Step::Result);
        let events = vec![
            Event::AutoAdvance { ticket: 0 },
            Event::SelectCategory(Category::IndexFund),
            Event::EditCurrentAssets("1".into()),
            Event::SubmitCurrentAssets("1".into()),
            Event::EditTargetAssets("1".into()),
            Event::SubmitTargetAssets("1".into()),
        ];
        for e in events {
            assert_eq!(reduce(&s, e), s);
        }
    }

    #[test]
    fn category_labels_are_distinct() {
        let labels: std::collections::HashSet<_> = Category::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels.len(), 8);
        assert!(labels.contains("まだ始めていない"));
    }

    #[test]
    fn step_next_is_linear() {
        for pair in Step::ALL.windows(2) {
            assert_eq!(pair[0].next(), pair[1]);
            assert_eq!(pair[1].index(), pair[0].index() + 1);
        }
        assert_eq!(Step::Result.next(), Step::Result);
    }

    fn any_event() -> impl Strategy<Value = Event> {
        prop_oneof![
            (0u32..8).prop_map(|ticket| Event::AutoAdvance { ticket }),
            (0usize..8).prop_map(|i| Event::SelectCategory(Category::ALL[i])),
            "[0-9a-z]{0,6}".prop_map(Event::EditCurrentAssets),
            "[0-9a-z]{0,6}".prop_map(Event::SubmitCurrentAssets),
            "[0-9a-z]{0,6}".prop_map(Event::EditTargetAssets),
            "[0-9a-z]{0,6}".prop_map(Event::SubmitTargetAssets),
        ]
    }

    proptest! {
        #[test]
        fn step_never_decreases(events in prop::collection::vec(any_event(), 0..60)) {
            let mut s = ShindanState::default();
            for e in events {
                let n = reduce(&s, e);
                prop_assert!(n.step >= s.step);
                prop_assert!(n.step.index() <= s.step.index() + 1);
                s = n;
            }
        }

        #[test]
        fn at_most_one_pending_advance(events in prop::collection::vec(any_event(), 0..60)) {
            let mut s = ShindanState::default();
            for e in events {
                let n = reduce(&s, e);
                if let (Some(before), Some(after)) = (s.pending, n.pending) {
                    if n.step == s.step {
                        prop_assert_eq!(before, after);
                    }
                }
                if let Some(p) = n.pending {
                    prop_assert_eq!(p.from, n.step);
                }
                s = n;
            }
        }
    }
}
