use super::tracker::QuizSession;

/// Presentation-agnostic snapshot of the currently displayed question.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no localization assumptions
///
/// `number` is 1-based for display; the hint text is always present but the
/// renderer should only reveal it once the user asks (and then call
/// `QuizSession::use_hint` so the usage is recorded).
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionView {
    pub number: usize,
    pub total: usize,
    pub text: String,
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub hint: String,
    pub hint_used: bool,
}

impl QuestionView {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        let question = session.current_question();
        let answer = session.current_answer();
        Self {
            number: session.current_index() + 1,
            total: session.total_questions(),
            text: question.text().to_owned(),
            options: question.options().to_vec(),
            selected: answer.selected(),
            hint: question.hint().to_owned(),
            hint_used: answer.hint_used(),
        }
    }
}

/// One entry in the question palette sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteItem {
    pub index: usize,
    pub answered: bool,
    pub is_current: bool,
}

/// Palette entries for every question, in order.
#[must_use]
pub fn palette(session: &QuizSession) -> Vec<PaletteItem> {
    (0..session.total_questions())
        .map(|index| PaletteItem {
            index,
            answered: session
                .answer(index)
                .is_some_and(super::tracker::AnswerState::is_answered),
            is_current: index == session.current_index(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::NavTarget;
    use clurious_core::model::{Question, QuestionId, QuizPayload};
    use clurious_core::time::fixed_now;

    fn session() -> QuizSession {
        let questions = (0..3)
            .map(|i| {
                Question::new(
                    QuestionId::new(format!("Q{i}")),
                    format!("text {i}"),
                    vec!["a".into(), "b".into()],
                    0,
                    format!("hint {i}"),
                    "explanation",
                    None,
                )
                .unwrap()
            })
            .collect();
        QuizSession::new(QuizPayload::new("View", questions).unwrap(), fixed_now())
    }

    #[test]
    fn view_tracks_current_question() {
        let mut s = session();
        s.select_answer(1).unwrap();
        s.navigate(NavTarget::Next, fixed_now()).unwrap();

        let view = QuestionView::from_session(&s);
        assert_eq!(view.number, 2);
        assert_eq!(view.total, 3);
        assert_eq!(view.text, "text 1");
        assert_eq!(view.selected, None);
        assert_eq!(view.hint, "hint 1");
    }

    #[test]
    fn palette_flags_answered_and_current() {
        let mut s = session();
        s.select_answer(0).unwrap();
        s.navigate(NavTarget::Index(2), fixed_now()).unwrap();

        let items = palette(&s);
        assert_eq!(items.len(), 3);
        assert!(items[0].answered);
        assert!(!items[0].is_current);
        assert!(!items[1].answered);
        assert!(items[2].is_current);
    }
}
