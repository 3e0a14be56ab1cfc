//! Tool-usage instructions injected into outgoing conversations.
//!
//! The gateway teaches the model the call syntax by prepending a fixed
//! instruction block to the first user-authored message. The rewrite
//! happens on the gateway's own copy of the conversation and is never
//! reflected back to the client.

use gtooling::ToolDescriptor;
use gupstream::{Message, Role};

/// Renders the instruction block for the given tools.
///
/// Output is deterministic: same descriptors in, same text out.
pub fn tool_instructions(descriptors: &[ToolDescriptor]) -> String {
    let mut text = String::from("You have access to the following tools:\n");

    for descriptor in descriptors {
        let params: Vec<&str> = descriptor
            .schema
            .params()
            .iter()
            .map(|spec| spec.name.as_str())
            .collect();

        if params.is_empty() {
            text.push_str(&format!("- {}: {}\n", descriptor.name, descriptor.description));
        } else {
            text.push_str(&format!(
                "- {}({}): {}\n",
                descriptor.name,
                params.join(", "),
                descriptor.description
            ));
        }
    }

    text.push_str(
        "\nWhen you need a tool to answer, include a call in your response \
         using exactly this format:\n\
         [TOOL_CALL: tool_name(parameter=value, other_parameter=\"value with spaces\")]\n\
         Only call a tool when it is required to answer the question.",
    );

    text
}

/// Prepends `instructions` to the first user-authored message in place.
///
/// Returns false when the conversation has no user message, in which case
/// nothing is modified and the conversation goes upstream as supplied.
pub fn augment_first_user_message(messages: &mut [Message], instructions: &str) -> bool {
    for message in messages.iter_mut() {
        if message.role == Role::User {
            message.content = format!("{instructions}\n\n{}", message.content);
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtooling::{ParameterSchema, ParameterSpec, ParameterType};

    fn weather_descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            "get_weather",
            "Returns canned weather conditions for a known city",
            ParameterSchema::new(vec![ParameterSpec::required("city", ParameterType::Text)]),
        )
    }

    #[test]
    fn instructions_list_tools_with_parameters() {
        let text = tool_instructions(&[weather_descriptor()]);

        assert!(text.contains("- get_weather(city):"));
        assert!(text.contains("[TOOL_CALL: tool_name(parameter=value"));
    }

    #[test]
    fn instructions_are_deterministic() {
        let descriptors = vec![weather_descriptor()];
        assert_eq!(tool_instructions(&descriptors), tool_instructions(&descriptors));
    }

    #[test]
    fn augmentation_rewrites_only_the_first_user_message() {
        let mut messages = vec![
            Message::new(Role::System, "be brief"),
            Message::new(Role::User, "first question"),
            Message::new(Role::Assistant, "first answer"),
            Message::new(Role::User, "second question"),
        ];

        let augmented = augment_first_user_message(&mut messages, "TOOLS");

        assert!(augmented);
        assert_eq!(messages[0].content, "be brief");
        assert_eq!(messages[1].content, "TOOLS\n\nfirst question");
        assert_eq!(messages[3].content, "second question");
    }

    #[test]
    fn conversation_without_user_messages_is_untouched() {
        let mut messages = vec![Message::new(Role::System, "be brief")];

        let augmented = augment_first_user_message(&mut messages, "TOOLS");

        assert!(!augmented);
        assert_eq!(messages[0].content, "be brief");
    }
}
