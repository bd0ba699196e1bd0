use std::collections::BTreeMap;
use std::sync::Arc;

use hairadvisor::models::ImageInput;
use hairadvisor::models::QuizProfile;
use hairadvisor::models::NO_IMAGE_DESCRIPTION;
use hairadvisor::rag::KnowledgeBase;
use hairadvisor::rag::Retriever;
use hairadvisor::HairAdvisorError;
use hairadvisor::Result;

mod common;
use common::fakes::*;

fn example_quiz() -> QuizProfile {
    QuizProfile {
        length: Some("long".to_string()),
        greasy_roots: Some(true),
        split_ends: Some(false),
        dryness: Some("low".to_string()),
        shine: Some("moderately shiny".to_string()),
        damage: Some("none".to_string()),
        colored_or_heat: Some(false),
        extra: BTreeMap::new(),
    }
}

#[tokio::test]
async fn test_end_to_end_example() -> Result<()> {
    let generator = FakeGenerator::new(WELL_FORMED_REPLY);
    let engine = engine(generator.clone()).await;

    let recommendation = engine
        .recommend(&example_quiz(), "hair looks smooth and hydrated")
        .await?;

    assert_eq!(
        recommendation.recommended_line.as_deref(),
        Some("Supreme Length")
    );
    assert_eq!(
        recommendation.alternative.as_deref(),
        Some("Aqua Revive for extra hydration")
    );

    // The retrieved knowledge in the prompt is the protection and moisture lines
    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    let knowledge = prompts[0]
        .split("Knowledge base:\n")
        .nth(1)
        .and_then(|rest| rest.split("\n\nHair quiz answers:").next())
        .unwrap_or_default();
    assert!(knowledge.contains("Protection category"));
    assert!(knowledge.contains("Moisture category"));
    assert!(!knowledge.contains("Nourishment category"));

    assert!(prompts[0].contains("greasy_roots: yes"));
    assert!(prompts[0].contains("hair looks smooth and hydrated"));
    Ok(())
}

#[tokio::test]
async fn test_fields_in_any_order_with_markup() -> Result<()> {
    let reply = "**Alternative:** Oil Nutritive\n\
                 *Product routine:* Shampoo + Mask twice a week\n\
                 __Reason:__ strong damage from bleaching\n\
                 ## Recommended line: Ultimate Repair";
    let engine = engine(FakeGenerator::new(reply)).await;
    let recommendation = engine.recommend(&example_quiz(), NO_IMAGE_DESCRIPTION).await?;

    assert_eq!(recommendation.recommended_line.as_deref(), Some("Ultimate Repair"));
    assert_eq!(recommendation.reason.as_deref(), Some("strong damage from bleaching"));
    assert_eq!(
        recommendation.product_routine.as_deref(),
        Some("Shampoo + Mask twice a week")
    );
    assert_eq!(recommendation.alternative.as_deref(), Some("Oil Nutritive"));
    Ok(())
}

#[tokio::test]
async fn test_missing_alternative_degrades_gracefully() -> Result<()> {
    let reply = "Recommended line: Aqua Revive\nReason: mild dryness\nProduct routine: Shampoo + Conditioner";
    let engine = engine(FakeGenerator::new(reply)).await;
    let recommendation = engine.recommend(&example_quiz(), NO_IMAGE_DESCRIPTION).await?;

    assert_eq!(recommendation.recommended_line.as_deref(), Some("Aqua Revive"));
    assert_eq!(recommendation.reason.as_deref(), Some("mild dryness"));
    assert_eq!(
        recommendation.product_routine.as_deref(),
        Some("Shampoo + Conditioner")
    );
    assert!(recommendation.alternative.is_none());
    Ok(())
}

#[tokio::test]
async fn test_unstructured_reply_is_not_an_error() -> Result<()> {
    let engine = engine(FakeGenerator::new("Sorry, I cannot help with that.")).await;
    let recommendation = engine.recommend(&example_quiz(), NO_IMAGE_DESCRIPTION).await?;
    assert!(recommendation.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_generator_failure_surfaces() {
    let engine = engine(Arc::new(FailingGenerator)).await;
    let err = engine
        .recommend(&example_quiz(), NO_IMAGE_DESCRIPTION)
        .await
        .unwrap_err();
    assert!(matches!(err, HairAdvisorError::GenerationUnavailable(_)));
}

#[tokio::test]
async fn test_retrieval_is_clamped_deterministic_and_self_similar() -> Result<()> {
    let embedder = embedder();
    let texts = vec![
        "Aqua Revive hydrates lightly dry hair".to_string(),
        "Oil Nutritive tames frizz".to_string(),
        "Total Repair seals split ends".to_string(),
    ];
    let base = KnowledgeBase::from_texts("small", texts.clone(), embedder.as_ref()).await?;
    let retriever = Retriever::new(embedder);

    let all = retriever.retrieve("dry frizzy ends", &base, 100).await?;
    assert_eq!(all.len(), 3);

    let again = retriever.retrieve("dry frizzy ends", &base, 100).await?;
    assert_eq!(all, again);

    for text in &texts {
        let top = retriever.retrieve(text, &base, 1).await?;
        assert_eq!(&top[0], text);
    }

    assert!(retriever.retrieve("anything", &base, 0).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_knowledge_bases_stay_separate() -> Result<()> {
    let embedder = embedder();
    let recommendation = load_base("recommendation", RECOMMENDATION_CORPUS, &embedder).await;
    let chatbot = load_base("chatbot", CHATBOT_CORPUS, &embedder).await;
    let retriever = Retriever::new(embedder);

    assert_eq!(recommendation.len(), 5);
    let from_chatbot = retriever.retrieve("How can I reduce frizz?", &chatbot, 2).await?;
    assert!(from_chatbot[0].starts_with("Frizz comes from"));
    for passage in &from_chatbot {
        assert!(!recommendation.passages().iter().any(|p| &p.text == passage));
    }
    Ok(())
}

#[tokio::test]
async fn test_advisor_flow_without_image() -> Result<()> {
    let generator = FakeGenerator::new(WELL_FORMED_REPLY);
    let advisor = advisor(generator.clone(), "unused").await;

    let outcome = advisor.analyze_and_recommend(example_quiz(), None).await?;
    assert!(outcome.user_id.starts_with("user_"));
    assert_eq!(outcome.profile.image_analysis, NO_IMAGE_DESCRIPTION);

    let stored = advisor.get_profile(&outcome.user_id).await?;
    assert_eq!(stored, outcome.profile);
    Ok(())
}

#[tokio::test]
async fn test_advisor_flow_with_image_and_chat() -> Result<()> {
    let generator = FakeGenerator::new(WELL_FORMED_REPLY);
    let advisor = advisor(generator.clone(), "hair looks smooth and hydrated").await;

    let image = ImageInput::new(vec![0xFF, 0xD8, 0xFF], Some("anna.jpg".to_string()));
    let outcome = advisor
        .analyze_and_recommend(example_quiz(), Some(image))
        .await?;
    assert_eq!(outcome.user_id, "anna");
    assert_eq!(outcome.profile.image_analysis, "hair looks smooth and hydrated");

    let reply = advisor.chat("anna", "How can I reduce frizz?").await?;
    assert_eq!(reply, WELL_FORMED_REPLY);

    let chat_prompt = generator.prompts().pop().unwrap_or_default();
    assert!(chat_prompt.contains("How can I reduce frizz?"));
    assert!(chat_prompt.contains("Recommended line: Supreme Length"));
    assert!(chat_prompt.contains("Frizz comes from"));
    Ok(())
}

#[tokio::test]
async fn test_chat_for_unknown_user() {
    let advisor = advisor(FakeGenerator::new("hi"), "unused").await;
    let err = advisor.chat("nobody", "hello").await.unwrap_err();
    assert!(matches!(err, HairAdvisorError::ProfileNotFound(_)));
}
