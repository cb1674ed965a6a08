//! Reading the source text, interactively or from a known path.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{ReadabilityError, Result};

/// Asks the user for input. Lets the prompt loop run without a terminal.
pub trait PathPrompt {
    /// Ask a question and return the raw answer.
    fn ask(&self, message: &str) -> Result<String>;

    /// Show a message that needs no answer.
    fn notify(&self, message: &str);
}

/// Terminal prompt backed by `inquire`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InquirePrompt;

impl PathPrompt for InquirePrompt {
    fn ask(&self, message: &str) -> Result<String> {
        inquire::Text::new(message)
            .prompt()
            .map_err(|e| ReadabilityError::Prompt(e.to_string()))
    }

    fn notify(&self, message: &str) {
        println!("{message}");
    }
}

/// Keep asking until the answer names a path that exists.
pub fn prompt_for_existing_file<P: PathPrompt + ?Sized>(prompt: &P) -> Result<PathBuf> {
    let mut path = PathBuf::from(prompt.ask("Enter filename:")?.trim());
    while !path.exists() {
        let err = ReadabilityError::MissingInputFile { path: path.clone() };
        warn!(%err, "asking again");
        prompt.notify(&format!("SORRY, the file {} does not exist.", path.display()));
        path = PathBuf::from(prompt.ask("Try another filename:")?.trim());
    }
    Ok(path)
}

pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(ReadabilityError::MissingInputFile {
            path: path.to_path_buf(),
        });
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(reader.lines().collect::<std::io::Result<Vec<_>>>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io::Write;

    struct ScriptedPrompt {
        answers: RefCell<VecDeque<String>>,
        asked: RefCell<Vec<String>>,
        notices: RefCell<Vec<String>>,
    }

    impl ScriptedPrompt {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
                asked: RefCell::new(Vec::new()),
                notices: RefCell::new(Vec::new()),
            }
        }
    }

    impl PathPrompt for ScriptedPrompt {
        fn ask(&self, message: &str) -> Result<String> {
            self.asked.borrow_mut().push(message.to_string());
            self.answers
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| ReadabilityError::Prompt("no more answers".to_string()))
        }

        fn notify(&self, message: &str) {
            self.notices.borrow_mut().push(message.to_string());
        }
    }

    #[test]
    fn test_existing_path_is_accepted_first_time() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let prompt = ScriptedPrompt::new(&[&path]);

        let chosen = prompt_for_existing_file(&prompt).unwrap();

        assert_eq!(chosen, file.path());
        assert_eq!(*prompt.asked.borrow(), vec!["Enter filename:"]);
        assert!(prompt.notices.borrow().is_empty());
    }

    #[test]
    fn test_missing_paths_are_asked_again() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let prompt = ScriptedPrompt::new(&["no/such/file.txt", "also-missing.txt", &path]);

        let chosen = prompt_for_existing_file(&prompt).unwrap();

        assert_eq!(chosen, file.path());
        assert_eq!(
            *prompt.asked.borrow(),
            vec![
                "Enter filename:",
                "Try another filename:",
                "Try another filename:"
            ]
        );
        assert_eq!(
            *prompt.notices.borrow(),
            vec![
                "SORRY, the file no/such/file.txt does not exist.",
                "SORRY, the file also-missing.txt does not exist.",
            ]
        );
    }

    #[test]
    fn test_prompt_failure_is_propagated() {
        let prompt = ScriptedPrompt::new(&["no/such/file.txt"]);
        let err = prompt_for_existing_file(&prompt).unwrap_err();
        assert!(matches!(err, ReadabilityError::Prompt(_)));
    }

    #[test]
    fn test_read_lines_keeps_line_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "First line.\nSecond line!\n").unwrap();

        let lines = read_lines(file.path()).unwrap();

        assert_eq!(lines, vec!["First line.", "Second line!"]);
    }

    #[test]
    fn test_read_lines_missing_file() {
        let err = read_lines(Path::new("definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, ReadabilityError::MissingInputFile { .. }));
    }
}
