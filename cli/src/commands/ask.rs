use super::{assistant_client, load_assistant_id};
use crate::output;
use anyhow::Result;
use assistant::{AssistantClient, Citations};
use config::Config;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const QUIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

pub async fn run(config: &Config) -> Result<()> {
    let Some(assistant_id) = load_assistant_id(config) else {
        return Ok(());
    };
    let client = assistant_client(config);

    for question in &config.qna.questions {
        ask_question(&client, &assistant_id, question).await;
    }

    println!("\nEnter your questions (type 'quit' to exit):");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let question = line.trim();
        if is_quit(question) {
            break;
        }
        if !question.is_empty() {
            ask_question(&client, &assistant_id, question).await;
        }
    }
    Ok(())
}

async fn ask_question(client: &AssistantClient, assistant_id: &str, question: &str) {
    println!("\nQuestion: {question}");
    println!("Answer:");

    let result = client
        .ask(assistant_id, question, |delta| {
            print!("{delta}");
            let _ = std::io::stdout().flush();
        })
        .await;

    match result {
        Ok(answer) => {
            println!("\n\nCitations:");
            for line in citation_lines(&answer.citations) {
                println!("{line}");
            }
            println!("{}", "-".repeat(50));
        }
        Err(err) => {
            println!();
            output::error(&format!("Error asking question: {err}"));
        }
    }
}

fn is_quit(input: &str) -> bool {
    QUIT_WORDS.iter().any(|word| input.eq_ignore_ascii_case(word))
}

fn citation_lines(citations: &Citations) -> Vec<String> {
    match citations {
        Citations::Found(found) => found
            .iter()
            .map(|citation| {
                format!(
                    "- {}: {}",
                    citation.text,
                    citation.file_id.as_deref().unwrap_or("No file citation")
                )
            })
            .collect(),
        Citations::NoneFound => vec!["No citations found.".to_string()],
        Citations::Unavailable => vec!["No citations available.".to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant::Citation;

    #[test]
    fn test_quit_words_ignore_case() {
        assert!(is_quit("quit"));
        assert!(is_quit("EXIT"));
        assert!(is_quit("Q"));
        assert!(!is_quit("question"));
        assert!(!is_quit(""));
    }

    #[test]
    fn test_citation_lines() {
        let found = Citations::Found(vec![
            Citation {
                text: "【4:0†source】".to_string(),
                file_id: Some("file-1".to_string())
            },
            Citation {
                text: "[1]".to_string(),
                file_id: None
            }
        ]);
        assert_eq!(
            citation_lines(&found),
            vec!["- 【4:0†source】: file-1", "- [1]: No file citation"]
        );
        assert_eq!(citation_lines(&Citations::NoneFound), vec!["No citations found."]);
        assert_eq!(
            citation_lines(&Citations::Unavailable),
            vec!["No citations available."]
        );
    }
}
