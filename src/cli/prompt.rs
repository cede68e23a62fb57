use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

/// Line-oriented stdin reader
pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print `label` and read one trimmed line. `None` at end of input.
    pub async fn ask(&mut self, label: &str) -> Result<Option<String>> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(label.as_bytes())
            .await
            .context("Failed to write prompt")?;
        stdout.flush().await.context("Failed to flush stdout")?;

        let line = self.lines.next_line().await.context("Failed to read input")?;
        Ok(line.map(|l| l.trim().to_string()))
    }

    /// Ask until the answer is a number in `1..=max`. `None` at end of input.
    pub async fn choose(&mut self, label: &str, max: usize) -> Result<Option<usize>> {
        loop {
            let Some(answer) = self.ask(label).await? else {
                return Ok(None);
            };
            match answer.parse::<usize>() {
                Ok(n) if (1..=max).contains(&n) => return Ok(Some(n - 1)),
                _ => println!("Enter a number between 1 and {max}."),
            }
        }
    }
}
