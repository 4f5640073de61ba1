//! Members table rendering

use crate::models::member::Member;

use super::{el, fmt_date, Listing, Node};

fn member_row(member: &Member) -> Node {
    el("tr")
        .child(el("td").text(member.id.to_string()))
        .child(
            el("td")
                .child(el("span").class("avatar").text(member.initials()))
                .child(el("strong").text(&member.name)),
        )
        .child(el("td").class("email").text(&member.email))
        .child(el("td").text(member.phone.clone().unwrap_or_else(|| "N/A".to_string())))
        .child(el("td").text(fmt_date(member.created_at)))
        .into()
}

/// Table body for the members page
pub fn table_body(listing: Listing<'_, Member>) -> Node {
    match listing {
        Listing::Loading => el("tbody")
            .child(el("tr").class("loading-row").child(el("td").text("Loading members...")))
            .into(),
        Listing::Failed => el("tbody")
            .child(el("tr").class("error-row").child(el("td").text("Error loading members")))
            .into(),
        Listing::Ready(members) if members.is_empty() => el("tbody")
            .child(el("tr").class("empty-row").child(el("td").text("No members found")))
            .into(),
        Listing::Ready(members) => el("tbody").children(members.iter().map(member_row)).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_row_contents() {
        let members = vec![Member {
            id: 7,
            name: "Ada Lovelace".to_string(),
            email: "ada@analytical.engine".to_string(),
            phone: None,
            created_at: None,
            updated_at: None,
        }];

        let body = table_body(Listing::Ready(&members));
        let text = body.text_content();
        assert!(text.contains("AL"));
        assert!(text.contains("Ada Lovelace"));
        assert!(text.contains("ada@analytical.engine"));
        assert!(text.contains("N/A"));
    }

    #[test]
    fn test_states_are_distinct() {
        assert!(table_body(Listing::Failed).find_class("error-row").is_some());
        assert!(table_body(Listing::Ready(&[])).find_class("empty-row").is_some());
        assert!(table_body(Listing::Loading).find_class("loading-row").is_some());
    }
}
