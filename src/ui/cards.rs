//! Plain-text cards for machines, farms and crops.
//!
//! Each renderer is a pure function of the record, suitable as a
//! [`PageSlicer`](super::PageSlicer) item callback.

use unicode_width::UnicodeWidthStr;

use super::format;
use crate::api::{Crop, Farm, FarmStatus, Machine};

pub const CARD_WIDTH: usize = 60;

/// Left text and right text on one line, padded to `width` display columns.
fn spread(left: &str, right: &str, width: usize) -> String {
    let used = left.width() + right.width();
    let gap = width.saturating_sub(used).max(1);
    format!("{left}{}{right}", " ".repeat(gap))
}

pub fn render_machine_card(machine: &Machine, currency: &str) -> String {
    let price = format!(
        "{currency} {} / {}",
        format::thousands(machine.price),
        machine.unit.label()
    );
    let mut badges = vec![if machine.available {
        "[✓ Available]"
    } else {
        "[✗ Unavailable]"
    }];
    if machine.operator {
        badges.push("[Operator]");
    }

    [
        spread(&machine.name, &price, CARD_WIDTH),
        badges.join(" "),
        format!("📍 {} · {}", machine.district, machine.category),
        spread(
            &format!("★ {} ({} reviews)", machine.rating, machine.reviews),
            &format!("#{}", machine.id),
            CARD_WIDTH,
        ),
    ]
    .join("\n")
}

pub fn render_farm_card(farm: &Farm) -> String {
    let badge = match farm.status {
        FarmStatus::Active => "[active]",
        FarmStatus::Idle => "[idle]",
    };
    [
        spread(&farm.name, badge, CARD_WIDTH),
        format!("📍 {}", farm.location),
        format!("Size: {} ha   Crop: {}", farm.size, farm.crop),
        format!("Owner: {}", farm.owner),
    ]
    .join("\n")
}

/// Crop card; the tips paragraph is wrapped to the card width.
pub fn render_crop_card(crop: &Crop) -> String {
    let mut lines = vec![
        spread(&crop.name, &crop.season, CARD_WIDTH),
        format!("Duration: {}   Water: {}", crop.duration, crop.water),
        format!("Machinery: {}", crop.machinery.join(", ")),
    ];
    lines.extend(
        textwrap::wrap(&crop.tips, CARD_WIDTH)
            .into_iter()
            .map(|line| line.into_owned()),
    );
    lines.join("\n")
}
