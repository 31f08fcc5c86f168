//! Static Hungarian furniture vocabulary.
//!
//! Each entry is `(canonical, members)` in display (accented) form; the
//! canonical term is implicitly a member of its own group. Lookup keys
//! are folded at [`Lexicon`](super::Lexicon) construction, so these
//! tables stay human-readable.

/// Furniture-type synonym groups.
pub(super) const FURNITURE_TYPES: &[(&str, &[&str])] = &[
    (
        "kanapé",
        &["ülőgarnitúra", "szófa", "heverő", "kerevet", "dívány", "sarokkanapé"],
    ),
    ("fotel", &["karosszék", "pihenőfotel", "zsöllye"]),
    ("szék", &["étkezőszék", "bárszék", "forgószék", "hokedli"]),
    (
        "asztal",
        &["étkezőasztal", "dohányzóasztal", "íróasztal", "tárgyalóasztal"],
    ),
    ("ágy", &["franciaágy", "ágykeret", "heverő"]),
    ("matrac", &[]),
    (
        "szekrény",
        &["gardrób", "ruhásszekrény", "tálalószekrény", "vitrin"],
    ),
    ("komód", &["éjjeliszekrény", "fiókosszekrény"]),
    ("polc", &["könyvespolc", "falipolc", "állvány"]),
    ("lámpa", &["állólámpa", "csillár", "falilámpa"]),
    ("szőnyeg", &["futószőnyeg"]),
    ("tükör", &["állótükör"]),
];

/// Style groups.
pub(super) const STYLES: &[(&str, &[&str])] = &[
    ("modern", &["kortárs", "letisztult"]),
    ("skandináv", &["északi", "nordic", "skandi"]),
    ("indusztriális", &["ipari", "loft"]),
    ("vintage", &["retró", "antik"]),
    ("bohém", &["boho", "etno"]),
    ("klasszikus", &["elegáns", "hagyományos"]),
    ("minimalista", &["minimál"]),
    ("rusztikus", &["vidéki", "provence"]),
];

/// Color groups.
pub(super) const COLORS: &[(&str, &[&str])] = &[
    ("fehér", &["törtfehér", "hófehér"]),
    ("fekete", &[]),
    ("szürke", &["antracit", "grafit", "világosszürke", "sötétszürke"]),
    ("bézs", &["krém", "krémszínű", "ekrü", "homok"]),
    ("barna", &["dió", "mogyoró", "csokoládébarna", "wenge"]),
    ("kék", &["világoskék", "sötétkék", "türkiz", "petrol"]),
    ("zöld", &["olajzöld", "mentazöld", "khaki"]),
    ("piros", &["bordó", "vörös", "terrakotta"]),
    ("sárga", &["mustár", "okker"]),
    ("rózsaszín", &["púder", "mályva"]),
    ("natúr", &["tölgy", "bükk", "fenyő"]),
    ("arany", &["bronz"]),
    ("ezüst", &["króm"]),
];

/// Room groups.
pub(super) const ROOMS: &[(&str, &[&str])] = &[
    ("nappali", &[]),
    ("hálószoba", &["háló", "hálószobai"]),
    ("étkező", &["konyha", "ebédlő"]),
    ("dolgozószoba", &["iroda", "dolgozó", "irodai"]),
    ("gyerekszoba", &["babaszoba"]),
    ("fürdőszoba", &["fürdő"]),
    ("előszoba", &["előtér", "folyosó"]),
    ("erkély", &["terasz", "kültéri"]),
];
