/// Rewrite markdown bold emphasis for WhatsApp.
///
/// WhatsApp renders `*text*` as bold; agents emit markdown `**text**`. The
/// substitution is a fixed textual rewrite applied on every delivery path.
#[must_use]
pub fn format_for_whatsapp(text: &str) -> String {
    text.replace("**", "*")
}
