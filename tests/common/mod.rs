#![allow(dead_code)]

use portfolio_shell::ui::contact::FIELD_NAMES;
use portfolio_shell::ui::dom::{Document, MemoryDocument, NodeId};
use portfolio_shell::ui::markup::{
    CLOSE_ICON_CLASS, CONTACT_FORM_ID, CURRENT_YEAR_ID, DEFERRED_SRC_ATTRIBUTE, HIDDEN_CLASS,
    ICON_ATTRIBUTE, MENU_ICON_CLASS, MOBILE_LINK_CLASS, MOBILE_MENU_BUTTON_ID, MOBILE_MENU_ID,
    NAVBAR_ID, NOTIFICATION_CLASS,
};
use url::Url;

/// Handles into the fixture page, captured while building it
#[derive(Debug, Clone, Copy)]
pub struct Ids {
    pub navbar: NodeId,
    pub about_link: NodeId,
    pub about_label: NodeId,
    pub broken_link: NodeId,
    pub menu_button: NodeId,
    pub menu_icon: NodeId,
    pub close_icon: NodeId,
    pub panel: NodeId,
    pub mobile_link: NodeId,
    pub hero: NodeId,
    pub near_card: NodeId,
    pub far_card: NodeId,
    pub near_image: NodeId,
    pub far_image: NodeId,
    pub github_link: NodeId,
    pub form: NodeId,
    pub fields: [NodeId; 4],
    pub submit_button: NodeId,
    pub year: NodeId,
}

/// A viewport of 800 px over a page roughly 4000 px tall
pub fn portfolio() -> (MemoryDocument, Ids) {
    let mut doc = MemoryDocument::new(Url::parse("https://anacosta.dev/").expect("valid url"));
    let body = doc.body();

    let navbar = doc.build(body, "nav").id(NAVBAR_ID).layout(0.0, 64.0).node();
    let about_link = doc.build(navbar, "a").attr("href", "#about").node();
    let about_label = doc.build(about_link, "span").text("Sobre").node();
    let broken_link = doc.build(navbar, "a").attr("href", "#blog").node();
    let menu_button = doc.build(navbar, "button").id(MOBILE_MENU_BUTTON_ID).node();
    let menu_icon = doc
        .build(menu_button, "i")
        .attr(ICON_ATTRIBUTE, "menu")
        .class(MENU_ICON_CLASS)
        .node();
    let close_icon = doc
        .build(menu_button, "i")
        .attr(ICON_ATTRIBUTE, "x")
        .class(CLOSE_ICON_CLASS)
        .class(HIDDEN_CLASS)
        .node();
    let panel = doc
        .build(navbar, "div")
        .id(MOBILE_MENU_ID)
        .class(HIDDEN_CLASS)
        .node();
    let mobile_link = doc
        .build(panel, "a")
        .attr("href", "#about")
        .class(MOBILE_LINK_CLASS)
        .node();

    let hero = doc.build(body, "header").id("home").layout(0.0, 700.0).node();
    let about = doc.build(body, "section").id("about").layout(900.0, 500.0).node();
    let near_card = doc
        .build(hero, "div")
        .class("studio-card")
        .layout(300.0, 200.0)
        .node();
    let far_card = doc
        .build(about, "div")
        .class("project-card")
        .layout(2400.0, 300.0)
        .node();
    let near_image = doc
        .build(hero, "img")
        .attr(DEFERRED_SRC_ATTRIBUTE, "/static/portrait.webp")
        .layout(100.0, 150.0)
        .node();
    let far_image = doc
        .build(far_card, "img")
        .attr(DEFERRED_SRC_ATTRIBUTE, "/static/atlas.webp")
        .layout(2400.0, 150.0)
        .node();
    let github_link = doc
        .build(far_card, "a")
        .attr("href", "https://github.com/anacosta/atlas")
        .node();

    let contact = doc.build(body, "section").id("contact").layout(3000.0, 800.0).node();
    let form = doc.build(contact, "form").id(CONTACT_FORM_ID).node();
    let mut fields = [form; 4];
    for (slot, name) in fields.iter_mut().zip(FIELD_NAMES) {
        let tag = if name == "message" { "textarea" } else { "input" };
        *slot = doc.build(form, tag).attr("name", name).node();
    }
    let submit_button = doc
        .build(form, "button")
        .attr("type", "submit")
        .text("Enviar")
        .node();
    let _ = doc.build(submit_button, "i").attr(ICON_ATTRIBUTE, "send").node();

    let footer = doc.build(body, "footer").layout(3800.0, 200.0).node();
    let year = doc.build(footer, "span").id(CURRENT_YEAR_ID).text("2000").node();

    let ids = Ids {
        navbar,
        about_link,
        about_label,
        broken_link,
        menu_button,
        menu_icon,
        close_icon,
        panel,
        mobile_link,
        hero,
        near_card,
        far_card,
        near_image,
        far_image,
        github_link,
        form,
        fields,
        submit_button,
        year,
    };
    (doc, ids)
}

pub fn fill_form(doc: &mut dyn Document, ids: &Ids, values: [&str; 4]) {
    for (field, value) in ids.fields.iter().zip(values) {
        doc.set_attribute(*field, "value", value);
    }
}

pub fn field_values(doc: &dyn Document, ids: &Ids) -> Vec<String> {
    ids.fields
        .iter()
        .map(|&field| doc.attribute(field, "value").unwrap_or_default())
        .collect()
}

/// Text of every toast currently attached to the document
pub fn toast_messages(doc: &dyn Document) -> Vec<String> {
    doc.elements_by_class(NOTIFICATION_CLASS)
        .into_iter()
        .filter_map(|toast| {
            doc.descendants(toast)
                .into_iter()
                .find(|&node| doc.tag(node) == "span")
                .map(|span| doc.text(span))
        })
        .collect()
}

/// Visible label of a button: its own text plus the text of its children
pub fn button_label(doc: &dyn Document, button: NodeId) -> String {
    let mut label = doc.text(button);
    for child in doc.descendants(button) {
        label.push_str(&doc.text(child));
    }
    label
}
