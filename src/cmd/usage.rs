pub const USAGE_GUIDE: &str = r#"Pinbot turns chat messages into Jira tickets.

The message text is summarized by a language model into a title, a context and
a summary, and a ticket is created with them.

How to use:
1. Write the message, starting with the project key in brackets:

   [BA20] The login endpoint returns 401 for inactive users.

2. React to the message with 📌.

A ticket is created in the matching project and the bot replies with its link.
Messages without a project key go to the default project.

Project examples: [BA20], [CP], [CSA], [SA], [AS]"#;

pub fn run() {
    println!("{USAGE_GUIDE}");
}
