//! Curated names the proper-noun pattern alone would miss or mangle
//! (single-word ring names, org acronyms, recurring show topics).

pub(crate) const PEOPLE: &[&str] = &[
    "Khabib",
    "Khabib Nurmagomedov",
    "Islam Makhachev",
    "Jon Jones",
    "Conor McGregor",
    "Dana White",
    "Joe Rogan",
    "Alex Pereira",
    "Ilia Topuria",
];

pub(crate) const ORGS: &[&str] = &["UFC", "Bellator", "PFL", "ONE Championship", "NFL", "NBA"];

pub(crate) const TOPICS: &[&str] = &[
    "jiu jitsu",
    "sambo",
    "wrestling",
    "striking",
    "weight cut",
    "title fight",
    "octagon",
];
