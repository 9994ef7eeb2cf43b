//! A sample portfolio page with known geometry.
//!
//! Layout in document pixels (viewport 1280x800):
//!
//! ```text
//!      0  header > nav (logo, hamburger, .nav-menu)
//!      0  section#home.hero      typewriter, cta, parallax
//!    800  section#about          about-text, counters, progress bar
//!   1600  section#work           stagger list, project card, image
//!   2800  section#contact        contact block (mailto), reveal block
//!   3600  footer
//! ```

use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::geometry::Rect;

/// Handles to the interesting nodes of [`sample_portfolio`].
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub dom: Dom,
    pub header: NodeId,
    pub nav: NodeId,
    pub logo: NodeId,
    pub hamburger: NodeId,
    pub bars: Vec<NodeId>,
    pub menu: NodeId,
    /// Menu links to home, about, work, contact.
    pub links: Vec<NodeId>,
    pub sections: Vec<NodeId>,
    pub typewriter: NodeId,
    pub cta: NodeId,
    pub parallax: NodeId,
    pub about_text: NodeId,
    pub counter: NodeId,
    pub bare_counter: NodeId,
    pub progress: NodeId,
    pub stagger: NodeId,
    pub stagger_items: Vec<NodeId>,
    pub card: NodeId,
    pub image: NodeId,
    pub contact: NodeId,
    pub mailto: NodeId,
    pub reveal: NodeId,
}

/// Build the sample page.
pub fn sample_portfolio() -> Portfolio {
    let mut dom = Dom::new();
    let body = dom.insert(NodeData::new("body").with_rect(Rect::block(0.0, 3800.0)));

    let header = dom.insert_child(body, NodeData::new("header").with_rect(Rect::block(0.0, 70.0)));
    let nav = dom.insert_child(header, NodeData::new("nav").with_rect(Rect::block(0.0, 70.0)));
    let logo = dom.insert_child(
        nav,
        NodeData::new("a").with_class("logo").with_href("#home").with_text("PW"),
    );
    let hamburger = dom.insert_child(nav, NodeData::new("div").with_class("hamburger"));
    let bars = (0..3)
        .map(|_| dom.insert_child(hamburger, NodeData::new("span").with_class("bar")))
        .collect();
    let menu = dom.insert_child(nav, NodeData::new("ul").with_class("nav-menu"));
    let links = ["home", "about", "work", "contact"]
        .into_iter()
        .map(|id| {
            let li = dom.insert_child(menu, NodeData::new("li"));
            dom.insert_child(li, NodeData::new("a").with_href(format!("#{id}")).with_text(id))
        })
        .collect();

    let home = dom.insert_child(
        body,
        NodeData::new("section")
            .with_id("home")
            .with_class("hero")
            .with_rect(Rect::block(0.0, 800.0)),
    );
    let typewriter = dom.insert_child(
        home,
        NodeData::new("h1")
            .with_class("typewriter")
            .with_text("Hi, I'm Phil")
            .with_rect(Rect::block(200.0, 60.0)),
    );
    let cta = dom.insert_child(
        home,
        NodeData::new("a")
            .with_class("cta-button")
            .with_href("#work")
            .with_text("See my work")
            .with_rect(Rect::block(500.0, 40.0)),
    );
    let parallax = dom.insert_child(
        home,
        NodeData::new("div")
            .with_class("parallax-element")
            .with_data("rate", "0.3")
            .with_rect(Rect::block(0.0, 800.0)),
    );

    let about = dom.insert_child(
        body,
        NodeData::new("section").with_id("about").with_rect(Rect::block(800.0, 800.0)),
    );
    let about_text = dom.insert_child(
        about,
        NodeData::new("div").with_class("about-text").with_rect(Rect::block(900.0, 300.0)),
    );
    let counter = dom.insert_child(
        about,
        NodeData::new("span")
            .with_class("counter")
            .with_data("count", "120")
            .with_text("0")
            .with_rect(Rect::block(1300.0, 40.0)),
    );
    let bare_counter = dom.insert_child(
        about,
        NodeData::new("span")
            .with_class("counter")
            .with_text("0")
            .with_rect(Rect::block(1300.0, 40.0)),
    );
    let progress = dom.insert_child(
        about,
        NodeData::new("div")
            .with_class("progress-fill")
            .with_data("percentage", "85")
            .with_rect(Rect::block(1400.0, 20.0)),
    );

    let work = dom.insert_child(
        body,
        NodeData::new("section").with_id("work").with_rect(Rect::block(1600.0, 1200.0)),
    );
    let stagger = dom.insert_child(
        work,
        NodeData::new("ul").with_class("stagger-container").with_rect(Rect::block(1700.0, 400.0)),
    );
    let stagger_items = (0..4)
        .map(|i| {
            dom.insert_child(
                stagger,
                NodeData::new("li")
                    .with_class("stagger-item")
                    .with_rect(Rect::block(1700.0 + f64::from(i) * 100.0, 100.0)),
            )
        })
        .collect();
    let card = dom.insert_child(
        work,
        NodeData::new("article").with_class("project-card").with_rect(Rect::block(2200.0, 400.0)),
    );
    let image = dom.insert_child(
        work,
        NodeData::new("img").with_class("image-reveal").with_rect(Rect::block(2650.0, 100.0)),
    );

    let contact_section = dom.insert_child(
        body,
        NodeData::new("section").with_id("contact").with_rect(Rect::block(2800.0, 800.0)),
    );
    let contact = dom.insert_child(
        contact_section,
        NodeData::new("div").with_class("contact-content").with_rect(Rect::block(2900.0, 300.0)),
    );
    let mailto = dom.insert_child(
        contact,
        NodeData::new("a").with_href("mailto:phil@example.com").with_text("Email me"),
    );
    let reveal = dom.insert_child(
        contact_section,
        NodeData::new("div").with_class("animate-on-scroll").with_rect(Rect::block(3300.0, 200.0)),
    );

    dom.insert_child(body, NodeData::new("footer").with_rect(Rect::block(3600.0, 200.0)));

    Portfolio {
        dom,
        header,
        nav,
        logo,
        hamburger,
        bars,
        menu,
        links,
        sections: vec![home, about, work, contact_section],
        typewriter,
        cta,
        parallax,
        about_text,
        counter,
        bare_counter,
        progress,
        stagger,
        stagger_items,
        card,
        image,
        contact,
        mailto,
        reveal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_shape() {
        let page = sample_portfolio();
        assert_eq!(page.bars.len(), 3);
        assert_eq!(page.links.len(), 4);
        assert_eq!(page.stagger_items.len(), 4);
        assert_eq!(page.dom.query_by_id("work"), Some(page.sections[2]));
        assert!(page.dom.contains_node(page.nav, page.links[3]));
        assert!(page.dom.contains_node(page.contact, page.mailto));
    }
}
