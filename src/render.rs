//! Server-side HTML for the rewards page
//!
//! Pure functions of an [`AppView`]; no data is fetched or validated here.

use crate::rewards::RewardCard;
use crate::session::{AppView, ConnectionState};

pub const APP_TITLE: &str = "SimpleFi's NFT rewarder";

pub fn render_page(view: &AppView) -> String {
    let body = match &view.connection {
        ConnectionState::NoWallet => render_no_wallet(),
        ConnectionState::Connected { account } => {
            let mut body = render_header(&account.to_string());
            if let Some(cards) = non_empty(&view.rewards.claimable) {
                body.push_str(&render_group("Claimable rewards", cards, CardKind::Claimable));
            }
            if let Some(cards) = non_empty(&view.rewards.claimed) {
                body.push_str(&render_group("Your rewards", cards, CardKind::Claimed));
            }
            body
        }
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
        title = escape_html(APP_TITLE),
        body = body,
    )
}

#[derive(Clone, Copy)]
enum CardKind {
    Claimed,
    Claimable,
}

fn non_empty(cards: &Option<Vec<RewardCard>>) -> Option<&[RewardCard]> {
    cards.as_deref().filter(|cards| !cards.is_empty())
}

fn render_no_wallet() -> String {
    "<div class=\"no-wallet\">\n\
     <p>No Ethereum wallet was detected.</p>\n\
     <p>Please install a wallet extension or connect a wallet node.</p>\n\
     </div>\n"
        .to_string()
}

fn render_header(account: &str) -> String {
    format!(
        "<nav class=\"menu\">\n<span class=\"title\">{}</span>\n<span class=\"account\">{}</span>\n</nav>\n",
        escape_html(APP_TITLE),
        escape_html(account),
    )
}

fn render_group(heading: &str, cards: &[RewardCard], kind: CardKind) -> String {
    let mut html = format!(
        "<section class=\"card-group\">\n<h2>{}</h2>\n",
        escape_html(heading)
    );
    for card in cards {
        html.push_str(&render_card(card, kind));
    }
    html.push_str("</section>\n");
    html
}

fn render_card(card: &RewardCard, kind: CardKind) -> String {
    let extra = match kind {
        CardKind::Claimed => format!(
            "<p class=\"extra\">You own: {}<br>Total supply: {}</p>\n",
            escape_html(&card.amount),
            escape_html(&card.supply),
        ),
        CardKind::Claimable => format!(
            "<p class=\"extra\">You can claim: {amount}<br>Total supply: {supply}</p>\n\
             <form method=\"post\" action=\"/claim\">\n\
             <input type=\"hidden\" name=\"token_address\" value=\"{address}\">\n\
             <input type=\"hidden\" name=\"token_id\" value=\"{token_id}\">\n\
             <input type=\"hidden\" name=\"amount\" value=\"{amount}\">\n\
             <button type=\"submit\">Claim</button>\n\
             </form>\n",
            amount = escape_html(&card.amount),
            supply = escape_html(&card.supply),
            address = escape_html(&card.token_address),
            token_id = escape_html(&card.token_id),
        ),
    };

    format!(
        "<div class=\"card\" id=\"{id}\">\n\
         <img src=\"{image}\" alt=\"{name}\">\n\
         <h3>{name}</h3>\n\
         <p class=\"description\">{description}</p>\n\
         {extra}\
         </div>\n",
        id = escape_html(&card.id),
        image = escape_html(&card.image_url),
        name = escape_html(&card.name),
        description = escape_html(&card.description),
        extra = extra,
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
