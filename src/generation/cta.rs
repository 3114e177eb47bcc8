//! Branded closing lines for styles that carry one.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::style::StyleTag;

/// Closing lines taken from the community-style corpus.
pub const BOARDY_CTAS: [&str; 5] = [
    "if you want help surrounding yourself with people who lift you up, not drain you - you can find them on Boardy.\n\nbecause when you spend enough time around winners,\nit stops feeling impossible to win too.",
    "That's exactly what I'm doing now with Boardy, a place where you can connect with the most inspiring people around the world, have real conversations, and start building your own community. DM Boardy on Linkedin to get started!\nYou never know what one conversation might spark.🔥",
    "If you want to make the most out of your time, and meet like-minded people, use Boardy, stop waiting for the perfect moment, and network NOW.",
    "Boardy is doing the same thing. You message it what you need, and it connects you to the right person. simplistic peak.",
    "Boardy was one of those platforms where I met individuals with the same drive, the same vision, and the same desire to grow\n\nit wasn't just about networking\n\nit was about building the kind of connections that accelerate your journey, that bring you closer to your dream\n\nno dream is ever too big, you got this",
];

/// Pool of closing lines for a style, empty for unbranded styles.
pub fn cta_pool(style: StyleTag) -> &'static [&'static str] {
    match style {
        StyleTag::Boardy => &BOARDY_CTAS,
        _ => &[],
    }
}

/// Append a branded closing line unless the brand is already mentioned.
///
/// Applying this twice yields the same text as applying it once.
pub fn inject_cta<R: Rng + ?Sized>(text: &str, style: StyleTag, rng: &mut R) -> String {
    let Some(keyword) = style.brand_keyword() else {
        return text.to_string();
    };
    if text.to_lowercase().contains(keyword) {
        return text.to_string();
    }
    match cta_pool(style).choose(rng) {
        Some(cta) => format!("{text}\n\n{cta}"),
        None => text.to_string(),
    }
}
