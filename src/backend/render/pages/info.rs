//! Informational and form pages
//!
//! The forms render as plain HTML posting JSON through the client bundle;
//! the server only supplies their markup and head tags.

use crate::backend::render::head::HeadMetadata;
use crate::backend::render::html::escape_html;
use crate::backend::render::pages::layout::{layout, page_head, EMAIL, PHONE_DISPLAY, PHONE_HREF, SITE_NAME};
use crate::backend::render::renderer::RenderedPage;
use crate::shared::Faq;

pub fn about(site_url: &str) -> RenderedPage {
    let main = r#"<section class="about"><h1>About Car Street</h1><p>Car Street is an independent used car dealership in Langton, Ontario. We hand-pick every vehicle on our lot, price it transparently and help every customer find financing that fits, whatever their credit history.</p><h2>Our Promise</h2><ul><li>Every vehicle inspected before sale</li><li>No hidden fees</li><li>Financing for all credit types</li><li>Fair offers on trade-ins and private sales</li></ul><a class="button" href="/inventory">Browse Inventory</a></section>"#;
    RenderedPage {
        html: layout(main),
        head: page_head(
            site_url,
            "/about",
            "About Us | Car Street Used Car Dealership",
            "Learn about Car Street, a trusted used car dealership in Langton, Ontario offering quality pre-owned vehicles and financing for all credit types.",
        ),
    }
}

pub fn contact(site_url: &str, faqs: &[Faq]) -> RenderedPage {
    let faq_section = if faqs.is_empty() {
        String::new()
    } else {
        let items: String = faqs
            .iter()
            .map(|faq| {
                format!(
                    "<details><summary>{}</summary><p>{}</p></details>",
                    escape_html(&faq.question),
                    escape_html(&faq.answer)
                )
            })
            .collect();
        format!(r#"<section class="faq"><h2>Frequently Asked Questions</h2>{items}</section>"#)
    };

    let main = format!(
        r#"<section class="contact"><h1>Contact Us</h1><form class="contact-form" data-endpoint="/api/contact"><h2>Send Us a Message</h2><label>Name<input name="name" maxlength="100" required /></label><label>Email<input name="email" type="email" maxlength="255" required /></label><label>Phone<input name="phone" type="tel" pattern="[0-9]{{10}}" /></label><label>Message<textarea name="message" maxlength="1000" required></textarea></label><button type="submit">Send Message</button></form><aside><h2>Visit Us</h2><p>#1-17 Queen St, Langton, ON N0E 1G0</p><p><a href="{PHONE_HREF}">{PHONE_DISPLAY}</a></p><p><a href="mailto:{EMAIL}">{EMAIL}</a></p><h2>Business Hours</h2><p>Monday - Friday: 9:00 AM - 8:00 PM</p><p>Saturday: 9:00 AM - 6:00 PM</p><p>Sunday: 10:00 AM - 5:00 PM</p></aside></section>{faq_section}"#
    );
    RenderedPage {
        html: layout(&main),
        head: page_head(
            site_url,
            "/contact",
            "Contact Us | Location, Hours & Phone Number | Car Street",
            "Get in touch with Car Street. Visit our dealership in Langton, Ontario or call us to find your perfect pre-owned vehicle. Open 7 days a week.",
        ),
    }
}

const SELL_STEPS: [&str; 6] = [
    "Vehicle Details",
    "Specs & Condition",
    "History",
    "Photos",
    "Personal Info",
    "Contact",
];

pub fn sell_your_car(site_url: &str) -> RenderedPage {
    let steps: String = SELL_STEPS
        .iter()
        .enumerate()
        .map(|(i, step)| format!(r#"<li data-step="{}">{step}</li>"#, i + 1))
        .collect();
    let main = format!(
        r#"<section class="sell-your-car"><h1>Sell Your Car</h1><p>Get an instant offer for your vehicle.</p><ol class="wizard-steps">{steps}</ol><div id="sell-wizard" data-endpoint="/api/sell-requests"></div></section>"#
    );
    RenderedPage {
        html: layout(&main),
        head: page_head(
            site_url,
            "/sell-your-car",
            "Sell Your Car | Car Street",
            "Get an instant offer for your vehicle.",
        ),
    }
}

pub fn pre_approval(site_url: &str) -> RenderedPage {
    let main = r#"<section class="pre-approval"><h1>Get Pre-Approved</h1><p>Apply in minutes. All credit types welcome, and applying will not affect your credit score.</p><div id="pre-approval-form" data-endpoint="/api/pre-approval"></div></section>"#;
    RenderedPage {
        html: layout(main),
        head: page_head(
            site_url,
            "/pre-approval",
            "Get Pre-Approved | Car Financing for All Credit Types | Car Street",
            "Apply for car financing at Car Street. Quick pre-approval for all credit types: good credit, bad credit or no credit.",
        ),
    }
}

pub fn privacy_policy(site_url: &str) -> RenderedPage {
    let main = format!(
        r#"<section class="privacy-policy"><h1>Privacy Policy</h1><h2>Information We Collect</h2><p>When you submit a contact, sell-your-car or financing form we collect the details you provide, such as your name, email address, phone number and vehicle information.</p><h2>How We Use It</h2><p>We use your information only to respond to your enquiry, prepare offers and arrange financing. We do not sell your personal information.</p><h2>Contact</h2><p>Questions about this policy can be sent to <a href="mailto:{EMAIL}">{EMAIL}</a>.</p></section>"#
    );
    RenderedPage {
        html: layout(&main),
        head: page_head(site_url, "/privacy-policy", "Privacy Policy", "Privacy Policy for Car Street"),
    }
}

/// Sign-in page; the client bundle talks to the auth service directly
pub fn auth() -> RenderedPage {
    let main = r#"<section class="auth"><h1>Staff Sign In</h1><div id="auth-form"></div></section>"#;
    RenderedPage {
        html: layout(main),
        head: HeadMetadata::new().with_title(&format!("Sign In | {SITE_NAME}")).noindex(),
    }
}

/// Back-office shell; everything inside is rendered by the client after sign-in
pub fn admin_shell() -> RenderedPage {
    RenderedPage {
        html: r#"<div id="admin-root" class="admin-loading">Loading...</div>"#.to_string(),
        head: HeadMetadata::new().with_title(&format!("Admin | {SITE_NAME}")).noindex(),
    }
}

pub fn not_found() -> RenderedPage {
    let main = r#"<section class="not-found"><h1>404</h1><p>Oops! Page not found</p><a class="button" href="/">Return to Home</a></section>"#;
    RenderedPage {
        html: layout(main),
        head: HeadMetadata::new().with_title(&format!("Page Not Found | {SITE_NAME}")).noindex(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_contact_lists_faqs_escaped() {
        let faqs = vec![Faq {
            id: Uuid::new_v4(),
            question: "Do you take trade-ins?".into(),
            answer: "Yes & we pay <fair> prices.".into(),
            display_order: 0,
            is_active: true,
        }];
        let page = contact("https://carstreet.ca", &faqs);
        assert!(page.html.contains("Frequently Asked Questions"));
        assert!(page.html.contains("Yes &amp; we pay &lt;fair&gt; prices."));
    }

    #[test]
    fn test_contact_without_faqs_omits_section() {
        let page = contact("https://carstreet.ca", &[]);
        assert!(!page.html.contains("Frequently Asked Questions"));
        assert!(page.html.contains(r#"pattern="[0-9]{10}""#));
    }

    #[test]
    fn test_private_pages_are_noindex() {
        for page in [auth(), admin_shell(), not_found()] {
            assert!(page.head.meta.contains("noindex"));
            assert!(page.head.link.is_empty());
        }
    }
}
