//! Interactive hair questionnaire
//!
//! Seven multiple-choice questions, two of them adaptive: greasy roots are
//! only asked about for medium or long hair, and the damage scale gains a
//! `severe` option when dryness is high or severe.

use std::io::BufRead;
use std::io::Write;

use crate::errors::HairAdvisorError;
use crate::errors::Result;
use crate::models::QuizProfile;

/// One selectable answer: what the user sees and what gets recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub label: &'static str,
    pub value: &'static str,
}

const fn choice(label: &'static str, value: &'static str) -> Choice {
    Choice { label, value }
}

#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub key: &'static str,
    pub prompt: &'static str,
    pub choices: &'static [Choice],
}

const YES_NO: &[Choice] = &[choice("yes", "yes"), choice("no", "no")];

pub const LENGTH: Question = Question {
    key: "length",
    prompt: "First things first, how long is your hair?",
    choices: &[
        choice("short", "short"),
        choice("medium", "medium"),
        choice("long", "long"),
    ],
};

pub const GREASY_ROOTS: Question = Question {
    key: "greasy_roots",
    prompt: "Do you often feel like your roots get oily or greasy between washes?",
    choices: YES_NO,
};

pub const SPLIT_ENDS: Question = Question {
    key: "split_ends",
    prompt: "When you look at your hair ends, do you notice dryness or split ends?",
    choices: YES_NO,
};

pub const DRYNESS: Question = Question {
    key: "dryness",
    prompt: "How would you describe your hair's overall moisture level?",
    choices: &[
        choice("low: it feels smooth and hydrated most of the time", "low"),
        choice("medium: it can get a bit dry sometimes", "medium"),
        choice("high: it feels dry often, especially at the ends", "high"),
        choice("severe: it's rough, frizzy, or extremely dry", "severe"),
    ],
};

pub const SHINE: Question = Question {
    key: "shine",
    prompt: "How shiny does your hair usually look under light?",
    choices: &[
        choice("very shiny: it reflects light easily and looks glossy", "very shiny"),
        choice("moderately shiny: it looks healthy but not too glossy", "moderately shiny"),
        choice("dull: it looks matte and lacks shine", "dull"),
        choice("very dull: it looks lifeless or flat even after washing", "very dull"),
    ],
};

/// Damage question asked when dryness is high or severe
pub const DAMAGE_SEVERE_SCALE: Question = Question {
    key: "damage",
    prompt: "Has your hair been damaged from coloring, bleaching, or heat styling?",
    choices: &[
        choice("none", "none"),
        choice("slight", "slight"),
        choice("moderate", "moderate"),
        choice("severe", "severe"),
    ],
};

/// Damage question asked otherwise
pub const DAMAGE_MILD_SCALE: Question = Question {
    key: "damage",
    prompt: "Would you say your hair is completely healthy or slightly stressed?",
    choices: &[
        choice("none", "none"),
        choice("slight", "slight"),
        choice("moderate", "moderate"),
    ],
};

pub const COLORED_OR_HEAT: Question = Question {
    key: "colored_or_heat",
    prompt: "Do you regularly color, bleach, or use hot tools (like straighteners or curlers)?",
    choices: YES_NO,
};

/// Run the quiz over `input`/`output`, re-prompting on invalid answers
pub fn run_quiz<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<QuizProfile> {
    writeln!(output, "Welcome to the hair quiz! Let's find your perfect haircare match.")?;
    let mut profile = QuizProfile::default();

    let length = ask(input, output, &LENGTH)?;
    profile.length = Some(length.to_string());

    profile.greasy_roots = Some(if matches!(length, "medium" | "long") {
        ask(input, output, &GREASY_ROOTS)? == "yes"
    } else {
        false
    });

    profile.split_ends = Some(ask(input, output, &SPLIT_ENDS)? == "yes");

    let dryness = ask(input, output, &DRYNESS)?;
    profile.dryness = Some(dryness.to_string());

    profile.shine = Some(ask(input, output, &SHINE)?.to_string());

    let damage = damage_question(dryness);
    profile.damage = Some(ask(input, output, damage)?.to_string());

    profile.colored_or_heat = Some(ask(input, output, &COLORED_OR_HEAT)? == "yes");

    writeln!(output, "\nYour hair profile has been recorded.")?;
    Ok(profile)
}

/// Damage scale for a given dryness level
#[must_use]
pub fn damage_question(dryness: &str) -> &'static Question {
    if matches!(dryness, "high" | "severe") {
        &DAMAGE_SEVERE_SCALE
    } else {
        &DAMAGE_MILD_SCALE
    }
}

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &Question,
) -> Result<&'static str> {
    writeln!(output, "\n{}", question.prompt)?;
    for (idx, choice) in question.choices.iter().enumerate() {
        writeln!(output, "{}. {}", idx + 1, capitalize(choice.label))?;
    }

    loop {
        write!(output, "Enter the number that best describes you: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(HairAdvisorError::InvalidInput(format!(
                "quiz ended before '{}' was answered",
                question.key
            )));
        }

        match line.trim().parse::<usize>() {
            Ok(n) if (1..=question.choices.len()).contains(&n) => {
                return Ok(question.choices[n - 1].value);
            }
            Ok(_) => writeln!(output, "Please choose a valid option number.")?,
            Err(_) => writeln!(output, "Please enter a valid number.")?,
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
