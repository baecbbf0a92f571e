use std::fmt::Display;

use chrono::TimeZone;
use tracing::{debug, error};

use crate::{
    api::Message,
    domain::{DownloadItem, ExtensionFilter},
    utils::{file_extension, format_timestamp, parse_timestamp, sanitize_filename},
};

const FILE_PREFIX: &str = "discord";
const SEPARATOR: &str = "_";

/// Walk the messages in order and turn every admitted attachment into a
/// download item named `discord_<local time>_<author>_<file name>`.
///
/// Messages whose timestamp does not parse are logged and skipped.
pub fn extract_items<Tz>(
    messages: &[Message],
    filter: &ExtensionFilter,
    tz: &Tz,
) -> Vec<DownloadItem>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut items = Vec::new();
    let total = messages.len();

    for (i, message) in messages.iter().enumerate() {
        debug!(
            author = %message.author.id,
            bot = message.author.is_bot,
            "Read ({}/{})",
            i + 1,
            total
        );

        let timestamp = match parse_timestamp(&message.timestamp, tz) {
            Ok(ts) => format_timestamp(&ts),
            Err(e) => {
                error!("Failed to parse Datetime ({}): {}", message.timestamp, e);
                continue;
            }
        };

        let author = sanitize_filename(&message.author.id);

        for attachment in &message.attachments {
            if !filter.allows(file_extension(&attachment.file_name)) {
                continue;
            }

            let file_name = sanitize_filename(&attachment.file_name);
            items.push(DownloadItem {
                target_path: [
                    FILE_PREFIX,
                    timestamp.as_str(),
                    author.as_str(),
                    file_name.as_str(),
                ]
                .join(SEPARATOR),
                source_url: attachment.url.clone(),
            });
        }
    }

    items
}
