//! Message and embed formatting.

use poise::serenity_prelude as serenity;

use unitrack_entity::AdminRole;
use unitrack_entity::unicycle::Unicycle;
use unitrack_service::{ListResult, PendingTransfer, TransferOutcome};

/// Longest description shown in a list entry.
const LIST_DESCRIPTION_CHARS: usize = 200;

/// Platform cap on the combined text of one embed.
pub const EMBED_TEXT_CHARS: usize = 6000;

/// Platform caps on individual embed parts.
const TITLE_CHARS: usize = 256;
const DESCRIPTION_CHARS: usize = 4096;

/// Kept free for the overflow footer.
const FOOTER_RESERVE: usize = 100;

/// Full card of one unicycle.
pub fn unicycle_embed(unicycle: &Unicycle) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(truncate(&unicycle.label(), TITLE_CHARS - 1))
        .description(truncate(
            or_placeholder(unicycle.description_str()),
            DESCRIPTION_CHARS - 1,
        ))
        .colour(serenity::Colour::BLUE)
        .field("Owner", unicycle.owner.display(), true)
        .field("Custody", unicycle.custodian.mention(), true)
}

/// Text of a list response, sized to fit in one embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLayout {
    /// Embed title.
    pub title: String,
    /// One `(name, value)` field per shown unicycle.
    pub fields: Vec<(String, String)>,
    /// Overflow note, present when entries were left out.
    pub footer: Option<String>,
}

impl ListLayout {
    /// Lay out as many entries as the embed text budget allows.
    pub fn new(result: &ListResult) -> Self {
        let title = truncate(&result.title(), TITLE_CHARS - 1);
        let mut used = title.chars().count() + FOOTER_RESERVE;
        let mut fields = Vec::new();

        for unicycle in result.shown() {
            let name = truncate(&unicycle.label(), TITLE_CHARS - 1);
            let value = list_entry(unicycle);
            let size = name.chars().count() + value.chars().count();
            if used + size > EMBED_TEXT_CHARS {
                break;
            }
            used += size;
            fields.push((name, value));
        }

        let hidden = result.unicycles.len() - fields.len();
        let footer = (hidden > 0).then(|| format!("…and {hidden} more. Narrow the filters to see them."));
        Self {
            title,
            fields,
            footer,
        }
    }

    /// Combined character count of every text part.
    pub fn text_chars(&self) -> usize {
        self.title.chars().count()
            + self
                .fields
                .iter()
                .map(|(name, value)| name.chars().count() + value.chars().count())
                .sum::<usize>()
            + self.footer.as_deref().map_or(0, |f| f.chars().count())
    }
}

/// A list response: one field per unicycle, with overflow noted in the footer.
pub fn list_embed(result: &ListResult) -> serenity::CreateEmbed {
    let layout = ListLayout::new(result);
    let mut embed = serenity::CreateEmbed::new()
        .title(layout.title)
        .colour(serenity::Colour::BLUE);

    for (name, value) in layout.fields {
        embed = embed.field(name, value, false);
    }

    if let Some(footer) = layout.footer {
        embed = embed.footer(serenity::CreateEmbedFooter::new(footer));
    }
    embed
}

/// Field body of one list entry.
pub fn list_entry(unicycle: &Unicycle) -> String {
    let mut body = format!(
        "Owner: {}\nCustody: {}",
        unicycle.owner.display(),
        unicycle.custodian.mention()
    );
    let description = unicycle.description_str();
    if !description.is_empty() {
        body.push('\n');
        body.push_str(&truncate(description, LIST_DESCRIPTION_CHARS));
    }
    body
}

/// Configured admin roles of a guild.
pub fn admin_roles_message(roles: &[AdminRole]) -> String {
    if roles.is_empty() {
        return "No admin roles are configured for this server.".to_string();
    }
    let lines: Vec<String> = roles.iter().map(|r| format!("• {}", r.role_id.mention())).collect();
    format!("Admin roles:\n{}", lines.join("\n"))
}

/// Prompt shown to the transfer recipient.
pub fn transfer_prompt(transfer: &PendingTransfer) -> String {
    format!(
        "{}, {} wants to transfer **#{}: {}** to you. Do you accept?",
        transfer.to.mention(),
        transfer.from.mention(),
        transfer.key.number,
        transfer.unicycle_name
    )
}

/// Final text of a resolved prompt.
pub fn transfer_result(outcome: &TransferOutcome) -> String {
    match outcome {
        TransferOutcome::Committed { transfer, unicycle } => format!(
            "{} accepted. **{}** is now in the custody of {}.",
            transfer.to.mention(),
            unicycle.label(),
            unicycle.custodian.mention()
        ),
        TransferOutcome::Declined { transfer } => format!(
            "{} declined the transfer of **#{}: {}**.",
            transfer.to.mention(),
            transfer.key.number,
            transfer.unicycle_name
        ),
    }
}

/// Final text of a prompt nobody answered in time.
pub fn transfer_expired(transfer: &PendingTransfer) -> String {
    format!(
        "The transfer of **#{}: {}** to {} expired.",
        transfer.key.number,
        transfer.unicycle_name,
        transfer.to.mention()
    )
}

/// Accept and Decline buttons.
pub fn transfer_buttons(accept_id: String, decline_id: String) -> Vec<serenity::CreateActionRow> {
    vec![serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(accept_id)
            .label("Accept")
            .style(serenity::ButtonStyle::Success),
        serenity::CreateButton::new(decline_id)
            .label("Decline")
            .style(serenity::ButtonStyle::Danger),
    ])]
}

fn or_placeholder(text: &str) -> &str {
    if text.is_empty() { "No description" } else { text }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
