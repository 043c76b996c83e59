//! Built-in game content: the memory-board vocabulary and the quiz pool.

/// Labels the deck builder draws pairs from.
pub const TERMS: [&str; 18] = [
    "Python",
    "Java",
    "C++",
    "JavaScript",
    "PHP",
    "SQL",
    "HTML",
    "CSS",
    "React",
    "Node",
    "Variable",
    "Function",
    "Loop",
    "Array",
    "Object",
    "Class",
    "API",
    "Git",
];

/// Default number of questions drawn per quiz run.
pub const QUIZ_LENGTH: usize = 10;

/// An un-normalized question as authored: choice order is fixed here and
/// shuffled per session by the quiz builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionSource {
    pub prompt: &'static str,
    pub choices: &'static [&'static str],
    pub correct: usize,
}

pub const QUESTION_BANK: [QuestionSource; 10] = [
    QuestionSource {
        prompt: "Which keyword declares a constant in JavaScript?",
        choices: &["let", "var", "const", "static"],
        correct: 2,
    },
    QuestionSource {
        prompt: "Which SQL clause filters rows?",
        choices: &["WHERE", "ORDER BY", "GROUP BY", "JOIN"],
        correct: 0,
    },
    QuestionSource {
        prompt: "In Python, which creates a function?",
        choices: &["func", "def", "lambda", "function"],
        correct: 1,
    },
    QuestionSource {
        prompt: "What does HTML stand for?",
        choices: &[
            "HyperText Markup Language",
            "HighText Machine Language",
            "Hyperlinks Text Mark Language",
            "Home Tool Markup Language",
        ],
        correct: 0,
    },
    QuestionSource {
        prompt: "Which is a valid CSS selector for a class?",
        choices: &["#box", ".box", "@box", "*box"],
        correct: 1,
    },
    QuestionSource {
        prompt: "Which data structure is key-value in JS?",
        choices: &["Array", "Object", "Tuple", "Set"],
        correct: 1,
    },
    QuestionSource {
        prompt: "Git command to upload commits?",
        choices: &["git push", "git pull", "git add", "git fork"],
        correct: 0,
    },
    QuestionSource {
        prompt: "Which loop runs at least once?",
        choices: &["for", "while", "do...while", "foreach"],
        correct: 2,
    },
    QuestionSource {
        prompt: "HTTP status for 'Not Found'?",
        choices: &["200", "301", "404", "500"],
        correct: 2,
    },
    QuestionSource {
        prompt: "Which is NOT a programming language?",
        choices: &["Python", "CSS", "Java", "C#"],
        correct: 1,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn vocabulary_has_no_duplicates() {
        let unique: HashSet<_> = TERMS.iter().collect();
        assert_eq!(unique.len(), TERMS.len());
    }

    #[test]
    fn every_question_has_a_valid_correct_index() {
        for q in &QUESTION_BANK {
            assert!(q.correct < q.choices.len(), "bad index in {:?}", q.prompt);
            assert!(!q.choices.is_empty());
        }
    }

    #[test]
    fn bank_covers_the_default_quiz_length() {
        assert!(QUESTION_BANK.len() >= QUIZ_LENGTH);
    }
}
