//! Copy for the marketing screens. Plain data, the renderer decides the layout.

pub struct Feature {
  pub title: &'static str,
  pub text: &'static str
}

pub struct TeamMember {
  pub name: &'static str,
  pub role: &'static str,
  pub bio: &'static str
}

pub struct Milestone {
  pub year: &'static str,
  pub title: &'static str,
  pub text: &'static str
}

pub struct Association {
  pub name: &'static str,
  pub partnership: &'static str,
  pub text: &'static str
}

pub struct Certification {
  pub year: &'static str,
  pub image: &'static str
}

pub const BRAND: &str = "GMPOL";

pub const HERO_TITLE: &str = "Your Trusted Source for Medical Equipment";
pub const HERO_TEXT: &str = "Discover high-quality medical equipment and parts, sourced globally and delivered with excellence. Empowering healthcare through reliable solutions.";

pub const FEATURES_TITLE: &str = "Why Choose GMPOL?";
pub const FEATURES: [Feature; 4] = [
  Feature { title: "Quality Assurance", text: "All our medical parts undergo rigorous quality checks and testing procedures." },
  Feature { title: "Global Sourcing", text: "Access to a worldwide network of trusted medical equipment suppliers." },
  Feature { title: "Certified Parts", text: "International standard certifications for all medical equipment." },
  Feature { title: "Healthcare Focus", text: "Dedicated to supporting healthcare providers with reliable solutions." }
];

pub const CALL_TO_ACTION_TITLE: &str = "Looking for Specific Medical Equipment?";
pub const CALL_TO_ACTION_TEXT: &str = "Contact our expert team today. We'll help you find the perfect solution for your healthcare facility.";

pub const ABOUT_TITLE: &str = "Our Story";
pub const ABOUT_TAGLINE: &str = "Building the future of healthcare equipment distribution since 2015";
pub const MISSION: &str = "To provide healthcare facilities with reliable, high-quality medical equipment through innovative distribution solutions and exceptional service, contributing to better healthcare outcomes across Pakistan and beyond.";
pub const VISION: &str = "To become the most trusted and innovative medical equipment solutions provider in the region, setting new standards in quality, reliability, and customer service while making advanced healthcare technology accessible to all.";

pub const TEAM: [TeamMember; 3] = [
  TeamMember { name: "Anwar Syed", role: "Founder & CEO", bio: "20+ years experience in medical equipment distribution" },
  TeamMember { name: "Sarah Ahmed", role: "Technical Director", bio: "Biomedical engineer with expertise in equipment maintenance" },
  TeamMember { name: "Dr. Malik Rahman", role: "Quality Assurance Head", bio: "Former hospital director with focus on equipment standards" }
];

pub const TIMELINE: [Milestone; 5] = [
  Milestone { year: "2015", title: "Company Founded", text: "Started operations in Karachi with a focus on patient monitoring equipment" },
  Milestone { year: "2017", title: "International Expansion", text: "Established partnerships with global manufacturers and expanded product range" },
  Milestone { year: "2019", title: "ISO Certification", text: "Achieved ISO 13485 certification for medical device quality management" },
  Milestone { year: "2021", title: "Regional Leadership", text: "Became one of Pakistan's leading medical equipment suppliers" },
  Milestone { year: "2023", title: "Digital Transformation", text: "Launched online platform for improved customer service and product access" }
];

pub const ASSOCIATIONS_TITLE: &str = "Our Global Associations";
pub const ASSOCIATIONS: [Association; 7] = [
  Association { name: "Karl Storz", partnership: "Strategic Partner", text: "Leading manufacturer of endoscopes and medical imaging equipment" },
  Association { name: "Olympus", partnership: "Premium Partner", text: "Global leader in medical technology and endoscopy solutions" },
  Association { name: "Stryker", partnership: "Technology Partner", text: "Innovative medical technology company specializing in surgical equipment" },
  Association { name: "Philips", partnership: "Healthcare Solutions Partner", text: "Healthcare technology leader in diagnostic imaging and patient monitoring" },
  Association { name: "Siemens Healthineers", partnership: "Diagnostic Partner", text: "Advanced medical imaging and laboratory diagnostics solutions" },
  Association { name: "GE Healthcare", partnership: "Healthcare Technology Partner", text: "Comprehensive medical imaging and monitoring solutions" },
  Association { name: "Drager", partnership: "Healthcare Technology Partner", text: "Comprehensive medical imaging and monitoring solutions" }
];

pub const CERTIFICATIONS: [Certification; 6] = [
  Certification { year: "2024", image: "https://images.dotmed.com/images/ethics/2024dm100.jpg" },
  Certification { year: "2019", image: "https://images.dotmed.com/images/ethics/2019dm100.jpg" },
  Certification { year: "2018", image: "https://images.dotmed.com/images/ethics/2018dm100.jpg" },
  Certification { year: "2017", image: "https://images.dotmed.com/images/ethics/2017dm100.jpg" },
  Certification { year: "2016", image: "https://images.dotmed.com/images/ethics/2016dm100.jpg" },
  Certification { year: "2015", image: "https://images.dotmed.com/images/ethics/2015dm100.jpg" }
];
pub const DOTMED_VERIFY_URL: &str = "https://www.dotmed.com/verify/user/122802";
pub const DOTMED_STORE_URL: &str = "https://www.dotmed.com/users/my/listings.html";

pub const CONTACT_TAGLINE: &str = "Get in touch with our team of medical equipment experts. We're here to help you find the right solutions.";

pub const OFFICES: [(&str, [&str; 3]); 2] = [
  ("Pakistan Office", ["18-C 24th Commercial Street,", "Phase-II, (EXT) DHA,", "Karachi, Pakistan"]),
  ("USA Office", ["1047 Dutch Mill Drive", "Ballwin, Missouri", "USA 63011"])
];
pub const WHATSAPP: &str = "https://wa.me/13145838759";

pub const ADDITIONAL_INFO: [(&str, &str); 2] = [
  ("Compatibility", "Contact us for detailed compatibility information."),
  ("Shipping & Handling", "All products are carefully packaged to ensure safe delivery. For international shipping or special handling requirements, please contact our sales team.")
];

/// Footer line, year included
pub fn copyright(year: i32) -> String {
  format!("© {} {}. All rights reserved.", year, BRAND)
}
