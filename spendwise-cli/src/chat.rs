use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use spendwise_core::{ChatHistory, ChatResponder, ExpenseRecord};

/// Daily transcript under `<home>/chat/YYYY-MM-DD.md`.
pub struct ChatLog {
    path: PathBuf,
}

impl ChatLog {
    pub fn open_today(home: &Path) -> Result<Self> {
        let dir = home.join("chat");
        std::fs::create_dir_all(&dir)?;
        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        let path = dir.join(format!("{today}.md"));
        Ok(Self { path })
    }

    fn append(&mut self, role: &str, msg: &str) -> Result<()> {
        let mut f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            f,
            "- {} [{}] {}",
            chrono::Utc::now().to_rfc3339(),
            role,
            msg.replace('\n', " ")
        )?;
        Ok(())
    }
}

/// Line-oriented chat. Reads questions until EOF or `/quit`.
pub fn chat_loop(
    input: impl BufRead,
    mut out: impl Write,
    expenses: &[ExpenseRecord],
    mut log: Option<&mut ChatLog>,
) -> Result<ChatHistory> {
    let responder = ChatResponder::new()?;
    let mut history = ChatHistory::new();

    for m in history.messages() {
        writeln!(out, "assistant: {}", m.text)?;
    }

    for line in input.lines() {
        let line = line?;
        let question = line.trim();
        if question == "/quit" {
            break;
        }
        let Some(reply) = history.ask(question, expenses, &responder) else {
            continue;
        };
        writeln!(out, "assistant: {reply}")?;

        if let Some(log) = log.as_deref_mut() {
            log.append("user", question)?;
            log.append("assistant", &reply)?;
        }
    }

    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendwise_core::Category;

    fn expenses() -> Vec<ExpenseRecord> {
        vec![
            ExpenseRecord::new("Lunch at office", 120.0, Category::Food).unwrap(),
            ExpenseRecord::new("Uber ride", 80.0, Category::Transport).unwrap(),
        ]
    }

    #[test]
    fn test_chat_loop_answers_until_quit() {
        let input = "total spending\n\nhow much on transport?\n/quit\nhow many transactions\n";
        let mut out = Vec::new();
        let history = chat_loop(input.as_bytes(), &mut out, &expenses(), None).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("assistant: Hello!"));
        assert!(text.contains("assistant: Your total spending is $200.00."));
        assert!(text.contains("assistant: You spent $80.00 on transport."));
        assert!(!text.contains("transactions."));
        // greeting + two question/answer pairs
        assert_eq!(history.messages().len(), 5);
    }

    #[test]
    fn test_chat_log_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = ChatLog::open_today(dir.path()).unwrap();
        chat_loop("transaction count\n".as_bytes(), Vec::new(), &[], Some(&mut log)).unwrap();

        let written = std::fs::read_to_string(&log.path).unwrap();
        assert!(written.contains("[user] transaction count"));
        assert!(written.contains("[assistant] You have made 0 transactions."));
    }
}
