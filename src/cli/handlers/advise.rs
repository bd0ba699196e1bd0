//! Recommendation handlers

use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;

use super::load_image;
use crate::advisor::HairAdvisor;
use crate::cli::output::print_error;
use crate::cli::output::print_info;
use crate::cli::output::print_recommendation;
use crate::cli::output::print_success;
use crate::errors::HairAdvisorError;
use crate::models::QuizProfile;
use crate::quiz::run_quiz;
use crate::Result;

const EXIT_WORDS: &[&str] = &["exit", "quit"];

/// Interactive session: image, quiz, recommendation, then a chat loop
pub async fn handle_advise(advisor: &HairAdvisor, image: Option<PathBuf>) -> Result<()> {
    println!("🪞 Welcome to the AI Haircare Advisor");

    let image_path = match image {
        Some(path) => Some(path),
        None => {
            let answer = read_line("Enter your image path (leave empty to skip): ")?;
            let answer = answer.trim();
            (!answer.is_empty()).then(|| PathBuf::from(answer))
        }
    };
    let image = match &image_path {
        Some(path) => Some(load_image(path).await?),
        None => None,
    };

    println!("\n🧠 Let's continue with a few short quiz questions.");
    let quiz = {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        run_quiz(&mut input, &mut output)?
    };

    println!("\n🔍 Generating your personalized recommendation...");
    let outcome = advisor.analyze_and_recommend(quiz, image).await?;
    println!("\n📸 Image analysis:\n{}\n", outcome.profile.image_analysis);
    print_recommendation(&outcome.profile.recommendation);
    print_success(&format!("Profile saved as '{}'", outcome.user_id));

    println!("\n💬 GlissBot is ready! Ask me anything about your hair.");
    println!("Type 'exit' anytime to end the chat.\n");

    loop {
        let message = read_line("You: ")?;
        let message = message.trim();
        if message.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&message.to_lowercase().as_str()) {
            println!("👋 GlissBot: Take care and keep shining ✨");
            break;
        }

        match advisor.chat_with_profile(&outcome.profile, message).await {
            Ok(reply) => println!("💬 GlissBot: {}\n", reply.trim()),
            Err(e) => print_error(&format!("Chat failed: {e}")),
        }
    }

    Ok(())
}

/// One-shot recommendation from a JSON quiz
pub async fn handle_recommend(
    advisor: &HairAdvisor,
    quiz_json: &str,
    image: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let quiz: QuizProfile = serde_json::from_str(quiz_json)
        .map_err(|e| HairAdvisorError::InvalidInput(format!("invalid quiz JSON: {e}")))?;
    let image = match image {
        Some(path) => Some(load_image(&path).await?),
        None => None,
    };

    let outcome = advisor.analyze_and_recommend(quiz, image).await?;

    if json {
        let body = serde_json::json!({
            "user_id": outcome.user_id,
            "image_analysis": outcome.profile.image_analysis,
            "quiz_data": outcome.profile.quiz,
            "recommendation": outcome.profile.recommendation,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_info(&format!("User id: {}", outcome.user_id));
        print_info(&format!("Image analysis: {}", outcome.profile.image_analysis));
        println!();
        print_recommendation(&outcome.profile.recommendation);
    }
    Ok(())
}

/// Prompt on stdout and read one line; EOF ends the session
fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(EXIT_WORDS[0].to_string());
    }
    Ok(line)
}
