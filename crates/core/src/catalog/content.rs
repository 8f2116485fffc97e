//! Marketing copy: testimonials, FAQs, the kitchen team, and brand values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub comment: String,
    pub image: String,
    /// Whole stars, 1-5.
    pub stars: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub title: String,
    pub image: String,
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandValue {
    pub icon: String,
    pub title: String,
    pub description: String,
}

fn unsplash(photo: &str, width: u32) -> String {
    format!("https://images.unsplash.com/{photo}?w={width}")
}

pub(crate) fn builtin_testimonials() -> Vec<Testimonial> {
    [
        (
            "Sarah Johnson",
            "An absolutely extraordinary dining experience. The attention to detail is unmatched.",
            "photo-1494790108377-be9c29b29330",
        ),
        (
            "Michael Chen",
            "The finest restaurant in the city. Every dish is a masterpiece.",
            "photo-1507003211169-0a1dd7228f2d",
        ),
        (
            "Emily Rodriguez",
            "Impeccable service and cuisine that exceeds all expectations.",
            "photo-1438761681033-6461ffad8d80",
        ),
    ]
    .into_iter()
    .map(|(name, comment, photo)| Testimonial {
        name: name.to_owned(),
        comment: comment.to_owned(),
        image: unsplash(photo, 200),
        stars: 5,
    })
    .collect()
}

pub(crate) fn builtin_faqs() -> Vec<Faq> {
    [
        (
            "What are your operating hours?",
            "We are open Monday-Thursday 11am-10pm, Friday-Saturday 11am-11pm, and Sunday 10am-9pm.",
        ),
        (
            "Do you accept walk-ins?",
            "Yes, we welcome walk-ins based on availability. However, we recommend making a reservation to guarantee a table.",
        ),
        (
            "Do you offer private dining or event spaces?",
            "Yes! We have private dining rooms available for events. Please contact our events team at events@cafenine.com.",
        ),
        (
            "What is your cancellation policy?",
            "We require at least 24 hours notice for cancellations. Same-day cancellations may be subject to a fee.",
        ),
    ]
    .into_iter()
    .map(|(question, answer)| Faq {
        question: question.to_owned(),
        answer: answer.to_owned(),
    })
    .collect()
}

pub(crate) fn builtin_team() -> Vec<TeamMember> {
    [
        (
            "Chef Alessandro Romano",
            "Executive Chef",
            "photo-1583394293214-28ded15ee548",
            "With over 20 years of culinary excellence, Chef Alessandro brings authentic Italian techniques combined with modern innovation.",
        ),
        (
            "Chef Yuki Tanaka",
            "Head Sushi Chef",
            "photo-1577219491135-ce391730fb2c",
            "Trained in Tokyo for 15 years, Chef Yuki is a master of traditional Japanese cuisine and brings unparalleled expertise.",
        ),
        (
            "Chef Marie Dubois",
            "Pastry Chef",
            "photo-1595273670150-bd0c3c392e46",
            "A graduate of Le Cordon Bleu Paris, Chef Marie creates exquisite desserts that are true works of art.",
        ),
    ]
    .into_iter()
    .map(|(name, title, photo, bio)| TeamMember {
        name: name.to_owned(),
        title: title.to_owned(),
        image: unsplash(photo, 800),
        bio: bio.to_owned(),
    })
    .collect()
}

pub(crate) fn builtin_values() -> Vec<BrandValue> {
    [
        (
            "🌟",
            "Quality Excellence",
            "We source only the finest ingredients from trusted suppliers around the world.",
        ),
        (
            "🌱",
            "Sustainability",
            "Committed to sustainable practices and supporting local farmers and producers.",
        ),
        (
            "❤️",
            "Passion",
            "Every dish is crafted with love, care, and dedication to culinary artistry.",
        ),
        (
            "🤝",
            "Community",
            "Building lasting relationships with our guests and being part of the community.",
        ),
    ]
    .into_iter()
    .map(|(icon, title, description)| BrandValue {
        icon: icon.to_owned(),
        title: title.to_owned(),
        description: description.to_owned(),
    })
    .collect()
}
