//! Fixed directory of gynecologists in Jaipur.

use crate::models::Gynecologist;

pub static GYNECOLOGISTS: [Gynecologist; 8] = [
    Gynecologist {
        id: "1",
        name: "Dr. Anjali Sharma",
        specialty: "Gynecologist & Obstetrician",
        area: "Malviya Nagar",
        address: "123, Jawahar Lal Nehru Marg, Malviya Nagar, Jaipur",
        city: "Jaipur",
        phone: "+91-141-2345678",
        rating: 4.8,
        experience: 15,
        education: "MBBS, MD (Obstetrics & Gynecology)",
        consultation_fee: 800,
        availability: &["Mon-Sat: 10:00 AM - 6:00 PM"],
        services: &["Pregnancy Care", "Gynecological Surgery", "Infertility Treatment", "PCOS Management"],
    },
    Gynecologist {
        id: "2",
        name: "Dr. Priya Meena",
        specialty: "Gynecologist",
        area: "C-Scheme",
        address: "45, C-Scheme, Near Ashok Marg, Jaipur",
        city: "Jaipur",
        phone: "+91-141-3456789",
        rating: 4.7,
        experience: 12,
        education: "MBBS, MS (Gynecology)",
        consultation_fee: 700,
        availability: &["Mon-Fri: 9:00 AM - 5:00 PM", "Sat: 9:00 AM - 2:00 PM"],
        services: &["Menstrual Disorders", "High-Risk Pregnancy", "Menopause Management"],
    },
    Gynecologist {
        id: "3",
        name: "Dr. Kavita Rajput",
        specialty: "Gynecologist & Laparoscopic Surgeon",
        area: "Vaishali Nagar",
        address: "67, Vaishali Nagar, Near Durgapura, Jaipur",
        city: "Jaipur",
        phone: "+91-141-4567890",
        rating: 4.9,
        experience: 18,
        education: "MBBS, MD, DNB (Gynecology)",
        consultation_fee: 1000,
        availability: &["Mon-Sat: 11:00 AM - 7:00 PM"],
        services: &["Laparoscopic Surgery", "Endometriosis Treatment", "Fertility Treatment", "Contraception Counseling"],
    },
    Gynecologist {
        id: "4",
        name: "Dr. Sunita Agarwal",
        specialty: "Gynecologist",
        area: "Mansarovar",
        address: "89, Mansarovar, Sector 5, Jaipur",
        city: "Jaipur",
        phone: "+91-141-5678901",
        rating: 4.6,
        experience: 10,
        education: "MBBS, DGO",
        consultation_fee: 600,
        availability: &["Mon-Sat: 10:00 AM - 4:00 PM"],
        services: &["Antenatal Care", "Normal Delivery", "Cesarean Section", "PCOS Treatment"],
    },
    Gynecologist {
        id: "5",
        name: "Dr. Rekha Jain",
        specialty: "Gynecologist & Infertility Specialist",
        area: "Raja Park",
        address: "12, Raja Park, Station Road, Jaipur",
        city: "Jaipur",
        phone: "+91-141-6789012",
        rating: 4.8,
        experience: 20,
        education: "MBBS, MD (OB/GYN), Fellowship in Reproductive Medicine",
        consultation_fee: 1200,
        availability: &["Mon-Fri: 2:00 PM - 8:00 PM", "Sat: 10:00 AM - 2:00 PM"],
        services: &["IVF Treatment", "IUI", "Fertility Counseling", "Hormonal Disorders"],
    },
    Gynecologist {
        id: "6",
        name: "Dr. Meera Choudhary",
        specialty: "Gynecologist",
        area: "Jagatpura",
        address: "34, Jagatpura Road, Near Chambal Garden, Jaipur",
        city: "Jaipur",
        phone: "+91-141-7890123",
        rating: 4.5,
        experience: 8,
        education: "MBBS, MD (Gynecology)",
        consultation_fee: 500,
        availability: &["Mon-Sat: 9:00 AM - 1:00 PM", "Evening: 5:00 PM - 8:00 PM"],
        services: &["Routine Gynecology", "Pregnancy Care", "Vaccination", "Health Check-ups"],
    },
    Gynecologist {
        id: "7",
        name: "Dr. Nisha Verma",
        specialty: "Gynecologist & Obstetrician",
        area: "Sindhi Camp",
        address: "78, Station Road, Sindhi Camp, Jaipur",
        city: "Jaipur",
        phone: "+91-141-8901234",
        rating: 4.7,
        experience: 14,
        education: "MBBS, MS (OB/GYN)",
        consultation_fee: 750,
        availability: &["Mon-Sat: 10:00 AM - 6:00 PM"],
        services: &["High-Risk Pregnancy", "Cesarean Section", "Fibroids Treatment", "Ovarian Cysts"],
    },
    Gynecologist {
        id: "8",
        name: "Dr. Deepa Sharma",
        specialty: "Gynecologist",
        area: "Bani Park",
        address: "56, Bani Park, MI Road, Jaipur",
        city: "Jaipur",
        phone: "+91-141-9012345",
        rating: 4.6,
        experience: 11,
        education: "MBBS, DGO, DNB",
        consultation_fee: 650,
        availability: &["Mon-Fri: 11:00 AM - 6:00 PM"],
        services: &["Menstrual Problems", "Contraception", "STD Screening", "Cancer Screening"],
    },
];

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches_filters(doc: &Gynecologist, area: Option<&str>, min_rating: Option<f32>) -> bool {
    area.map_or(true, |a| contains_ci(doc.area, a))
        && min_rating.map_or(true, |r| doc.rating >= r)
}

fn by_rating_desc(mut docs: Vec<&'static Gynecologist>) -> Vec<&'static Gynecologist> {
    docs.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    docs
}

pub fn list(area: Option<&str>, min_rating: Option<f32>) -> Vec<&'static Gynecologist> {
    by_rating_desc(
        GYNECOLOGISTS
            .iter()
            .filter(|d| matches_filters(d, area, min_rating))
            .collect(),
    )
}

/// Free-text match over name, specialty and area, on top of the list filters.
pub fn search(
    query: Option<&str>,
    area: Option<&str>,
    min_rating: Option<f32>,
) -> Vec<&'static Gynecologist> {
    by_rating_desc(
        GYNECOLOGISTS
            .iter()
            .filter(|d| {
                query.map_or(true, |q| {
                    contains_ci(d.name, q) || contains_ci(d.specialty, q) || contains_ci(d.area, q)
                })
            })
            .filter(|d| matches_filters(d, area, min_rating))
            .collect(),
    )
}

pub fn find(id: &str) -> Option<&'static Gynecologist> {
    GYNECOLOGISTS.iter().find(|d| d.id == id)
}

pub fn top_rated(limit: usize) -> Vec<&'static Gynecologist> {
    let mut docs = list(None, None);
    docs.truncate(limit);
    docs
}
