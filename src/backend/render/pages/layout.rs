//! Site chrome shared by every public page

use crate::backend::render::head::HeadMetadata;
use crate::backend::render::html::{escape_html, format_km, format_price};
use crate::backend::seo::structured_data::{DEALER_LOCALITY, DEALER_POSTAL_CODE, DEALER_REGION};
use crate::shared::Vehicle;

pub const SITE_NAME: &str = "Car Street";
pub const PHONE_DISPLAY: &str = "(639) 899-0000";
pub const PHONE_HREF: &str = "tel:+16398990000";
pub const EMAIL: &str = "info@carstreet.ca";

const NAV: [(&str, &str); 6] = [
    ("/", "Home"),
    ("/inventory", "Inventory"),
    ("/sell-your-car", "Sell Your Car"),
    ("/pre-approval", "Get Pre-Approved"),
    ("/about", "About"),
    ("/contact", "Contact"),
];

/// Title, description, canonical link and Open Graph tags for an indexable page
pub fn page_head(site_url: &str, path: &str, title: &str, description: &str) -> HeadMetadata {
    page_head_of_type(site_url, path, title, description, "website")
}

pub fn page_head_of_type(
    site_url: &str,
    path: &str,
    title: &str,
    description: &str,
    og_type: &str,
) -> HeadMetadata {
    let url = format!("{site_url}{path}");
    HeadMetadata::new()
        .with_title(title)
        .with_meta("description", description)
        .with_property("og:title", title)
        .with_property("og:description", description)
        .with_property("og:url", &url)
        .with_property("og:type", og_type)
        .with_property("og:site_name", SITE_NAME)
        .with_link("canonical", &url)
}

/// Wrap page content in the header and footer
pub fn layout(main: &str) -> String {
    format!(
        r#"<div class="min-h-screen flex flex-col">{}<main class="flex-1">{main}</main>{}</div>"#,
        header(),
        footer()
    )
}

fn header() -> String {
    let links: String = NAV
        .iter()
        .map(|(href, label)| format!(r#"<a href="{href}">{label}</a>"#))
        .collect();
    format!(
        r#"<header class="site-header"><a class="logo" href="/">CAR <span class="text-accent">STREET</span></a><nav>{links}</nav><a class="phone" href="{PHONE_HREF}">{PHONE_DISPLAY}</a></header>"#
    )
}

fn footer() -> String {
    format!(
        r#"<footer class="site-footer"><section><h4>Business Hours</h4><p>Monday - Friday: 9:00 AM - 8:00 PM</p><p>Saturday: 9:00 AM - 6:00 PM</p><p>Sunday: 10:00 AM - 5:00 PM</p></section><section><h4>Contact Us</h4><p><a href="{PHONE_HREF}">{PHONE_DISPLAY}</a></p><p><a href="mailto:{EMAIL}">{EMAIL}</a></p><p>#1-17 Queen St<br />{DEALER_LOCALITY}, {DEALER_REGION} {DEALER_POSTAL_CODE}</p></section><p class="copyright">&copy; {SITE_NAME}. All rights reserved. <a href="/privacy-policy">Privacy Policy</a></p></footer>"#
    )
}

/// Listing card linking to the vehicle detail page
pub fn vehicle_card(vehicle: &Vehicle) -> String {
    let title = escape_html(&vehicle.title());
    let image = match vehicle.primary_image() {
        Some(image) => format!(
            r#"<img src="{}" alt="{title}" loading="lazy" />"#,
            escape_html(&image.image_url)
        ),
        None => format!(r#"<img src="/placeholder.svg" alt="{title}" loading="lazy" />"#),
    };
    format!(
        r#"<article class="vehicle-card"><a href="/vehicle/{id}">{image}<h3>{title}</h3><p class="price">{price}</p><p class="specs">{km} &middot; {transmission} &middot; {fuel}</p></a></article>"#,
        id = vehicle.id,
        price = format_price(vehicle.price),
        km = format_km(vehicle.mileage),
        transmission = escape_html(&vehicle.transmission),
        fuel = escape_html(&vehicle.fuel_type),
    )
}
