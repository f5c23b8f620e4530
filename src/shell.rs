//! Interactive console session: banner, input collection, output framing.
//!
//! One session handles exactly one invention description. Input is read
//! from stdin until two consecutive blank lines; the analysis report is
//! printed framed by separator rules.

use std::io::BufRead;

use crate::agent::Agent;
use crate::config::Config;

/// Print the welcome banner and usage instructions.
pub fn print_welcome() {
    println!("{}", "=".repeat(60));
    println!("    PATENT COPILOT - Patent Search Agent");
    println!("{}", "=".repeat(60));
    println!("\nWelcome! I'll help you search for patents similar to your invention.");
    println!("\nHow to use:");
    println!("- Describe your invention in detail");
    println!("- Include key technical features and functionality");
    println!("- Be specific about what makes it unique");
    println!("\nExample: 'A smart water bottle that tracks hydration levels");
    println!("using sensors and sends reminders to a mobile app'");
    println!("\n{}", "-".repeat(60));
}

/// Read one invention description: lines up to two consecutive blank lines,
/// trailing blank lines stripped. Returns `None` when the description is
/// empty (the caller re-prompts) and also when input ends first.
pub fn collect_description(reader: &mut impl BufRead) -> std::io::Result<Option<String>> {
    let mut lines: Vec<String> = Vec::new();
    let mut empty_lines = 0;

    while empty_lines < 2 {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            // EOF counts as terminating the description.
            break;
        }
        let line = line.trim_end_matches(['\n', '\r']).to_string();
        if line.trim().is_empty() {
            empty_lines += 1;
        } else {
            empty_lines = 0;
        }
        lines.push(line);
    }

    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let description = lines.join("\n").trim().to_string();
    if description.is_empty() {
        Ok(None)
    } else {
        Ok(Some(description))
    }
}

/// Prompt until a non-empty description is collected. An explicit loop, so
/// persistent blank input cannot grow the stack; EOF ends the session.
pub fn read_description(reader: &mut impl BufRead) -> std::io::Result<Option<String>> {
    loop {
        println!("\nPlease describe your invention:");
        println!("(Press Enter twice when finished)");

        match collect_description(reader)? {
            Some(description) => return Ok(Some(description)),
            None => {
                // Distinguish "blank input, try again" from EOF.
                if reader.fill_buf()?.is_empty() {
                    return Ok(None);
                }
                println!("Please provide a description of your invention.");
            }
        }
    }
}

/// Run one interactive session: banner, input, analysis, report.
pub async fn run(config: Config) -> anyhow::Result<()> {
    print_welcome();

    println!("\nInitializing patent analysis agent...");
    let agent = Agent::from_config(&config);
    println!("Agent ready.");

    let stdin = std::io::stdin();
    let mut reader = stdin.lock();
    let Some(description) = read_description(&mut reader)? else {
        println!("\nNo description provided. Exiting.");
        return Ok(());
    };

    println!("\nAnalyzing invention and searching for similar patents...");
    println!("This may take a moment...\n");

    let report = agent.analyze(&description).await;

    println!("\nAnalysis Results:");
    println!("{}", "=".repeat(60));
    println!("{report}");
    println!("\n{}", "=".repeat(60));

    Ok(())
}
