//! Prompt templates for the chat-completions provider

use noire_domain::{DialogueTurn, Suspect};

/// System message sent with every request
pub const SYSTEM_PROMPT: &str = "You are a creative assistant helping run an interactive \
murder mystery game. Always return valid JSON when requested.";

/// Prompt asking for a complete case with `suspect_count` suspects.
pub fn case_prompt(suspect_count: usize) -> String {
    format!(
        r#"Generate a murder mystery case with the following structure:

1. Setting: an intriguing, cinematic combination of time and place for the crime, such as a hotel in New York in the 1960s, a steamboat on the Nile in 1917, or a ski resort in the Alps in the 2000s. Let the era shape every detail.
2. Create a victim and the murder details (weapon, location, time).
3. Generate exactly {count} suspects. Exactly one of them is the killer.
4. Each suspect needs: id (unique string), name, age, occupation, description, backstory, alibi, connections (names of other suspects), isKiller (boolean, true for exactly one suspect).
5. Create logical connections between the suspects.
6. The killer's alibi should contain subtle inconsistencies.

Return ONLY valid JSON with this exact structure:
{{
  "setting": "string",
  "victim": "string",
  "murderWeapon": "string",
  "murderLocation": "string",
  "murderTime": "string",
  "backstory": "string",
  "characters": [
    {{
      "id": "string",
      "name": "string",
      "age": number,
      "occupation": "string",
      "description": "string",
      "backstory": "string",
      "alibi": "string",
      "connections": ["string"],
      "isKiller": boolean
    }}
  ]
}}"#,
        count = suspect_count
    )
}

/// Prompt asking `suspect` to answer `question` in character.
pub fn reply_prompt(suspect: &Suspect, question: &str, history: &[DialogueTurn]) -> String {
    let transcript = history
        .iter()
        .map(|turn| turn.to_string())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are {name}, a {occupation}.

Character details:
- Age: {age}
- Description: {description}
- Backstory: {backstory}
- Alibi: {alibi}
- Is killer: {is_killer}
- Connections: {connections}

Rules:
- If you are NOT the killer, always tell the truth.
- If you ARE the killer, you may lie to protect yourself, but be subtle.
- Stay in character with your personality and background.
- Reference your connections to other characters when relevant.
- Keep responses conversational and realistic.

Conversation so far:
{transcript}

Player asks: "{question}"

Respond as this character would and say whether the response contains a lie.
Return ONLY valid JSON in this format: {{"response": "your response here", "isLie": true/false}}"#,
        name = suspect.name,
        occupation = suspect.occupation,
        age = suspect.age,
        description = suspect.description,
        backstory = suspect.backstory,
        alibi = suspect.alibi,
        is_killer = suspect.is_killer,
        connections = suspect.connections.join(", "),
        transcript = transcript,
        question = question,
    )
}
