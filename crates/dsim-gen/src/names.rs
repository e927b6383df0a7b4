//! Synthetic recipient names.

use rand::Rng;

const GIVEN_NAMES: &[&str] = &[
    "Amina", "Grace", "Joseph", "Fatuma", "Peter", "Esther", "Samuel", "Mary", "David", "Aisha",
    "Daniel", "Ruth", "Emmanuel", "Janet", "Moses", "Agnes", "John", "Faith", "Isaac", "Mercy",
    "Kwame", "Ama", "Chinedu", "Ngozi", "Tendai", "Chipo", "Baraka", "Neema", "Yaw", "Adwoa",
    "Ibrahim", "Halima", "Brian", "Doreen", "Patrick", "Winnie", "Musa", "Zainab", "Elijah", "Lydia",
];

const FAMILY_NAMES: &[&str] = &[
    "Okello", "Namukasa", "Mwangi", "Otieno", "Wanjiru", "Kiprop", "Mushi", "Mollel", "Banda",
    "Phiri", "Mwale", "Chirwa", "Okafor", "Adeyemi", "Bello", "Eze", "Mensah", "Owusu", "Boateng",
    "Asante", "Macuacua", "Sitoe", "Nkemelu", "Fotso", "Ndiaye", "Achieng", "Kato", "Ssempala",
    "Njoroge", "Lungu",
];

/// "Given Family", each part drawn uniformly.
pub fn person_name(rng: &mut impl Rng) -> String {
    let given = GIVEN_NAMES[rng.gen_range(0..GIVEN_NAMES.len())];
    let family = FAMILY_NAMES[rng.gen_range(0..FAMILY_NAMES.len())];
    format!("{given} {family}")
}
