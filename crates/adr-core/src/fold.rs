//! Folding of accented and decorated Unicode text to plain ASCII.
//!
//! Two static tables drive the transform: [`GROUPS`] maps sets of characters
//! to one replacement, [`RANGES`] covers the systematic enclosed and
//! fullwidth blocks. Characters found in neither table are kept as is.

use std::collections::HashMap;
use std::sync::OnceLock;

/// `(source characters, ASCII replacement)`.
const GROUPS: &[(&str, &str)] = &[
    // Uppercase letters
    ("ÀÁÂÃÄÅĀĂĄƏǍǞǠǺȀȂȦȺᴀḀẠẢẤẦẨẪẬẮẰẲẴẶ", "A"),
    ("Ꜳ", "AA"),
    ("ÆǢǼᴁ", "AE"),
    ("Ꜵ", "AO"),
    ("Ꜷ", "AU"),
    ("ꜸꜺ", "AV"),
    ("Ꜽ", "AY"),
    ("ƁƂɃʙᴃḂḄḆ", "B"),
    ("ÇĆĈĊČƇȻʗᴄḈ", "C"),
    ("ÐĎĐƉƊƋᴅᴆḊḌḎḐḒ", "D"),
    ("Ǆ", "DZ"),
    ("ǅǲ", "Dz"),
    ("ÈÉÊËĒĔĖĘĚƎƐȄȆȨɆᴇḔḖḘḚḜẸẺẼẾỀỂỄỆ", "E"),
    ("ƑḞꜰꝻ", "F"),
    ("ĜĞĠĢƓǤǦǴɢʛḠꝽꝾ", "G"),
    ("ĤĦȞʜḢḤḦḨḪⱧ", "H"),
    ("ÌÍÎÏĨĪĬĮİƖƗǏȈȊɪᵻḬḮỈỊ", "I"),
    ("Ĳ", "IJ"),
    ("ĴɈᴊ", "J"),
    ("ĶƘǨᴋḰḲḴⱩꝀꝂꝄ", "K"),
    ("ĹĻĽĿŁȽʟᴌḶḸḺḼⱠⱢꝆꝈꞀ", "L"),
    ("Ǉ", "LJ"),
    ("ǈ", "Lj"),
    ("ƜᴍḾṀṂⱮ", "M"),
    ("ÑŃŅŇŊƝǸȠɴᴎṄṆṈṊ", "N"),
    ("Ǌ", "NJ"),
    ("ǋ", "Nj"),
    ("ÒÓÔÕÖØŌŎŐƆƟƠǑǪǬǾȌȎȪȬȮȰᴏᴐṌṎṐṒỌỎỐỒỔỖỘỚỜỞỠỢꝊꝌ", "O"),
    ("Œɶ", "OE"),
    ("Ꝏ", "OO"),
    ("Ȣᴕ", "OU"),
    ("ƤᴘṔṖⱣꝐꝒꝔ", "P"),
    ("ꝖꝘɊ", "Q"),
    ("ŔŖŘȐȒɌʀʁᴙᴚṘṚṜṞⱤꝚꞂ", "R"),
    ("ŚŜŞŠȘṠṢṤṦṨꜱꞄ", "S"),
    ("ẞ", "SS"),
    ("ŢŤŦƬƮȚȾᴛṪṬṮṰꞆ", "T"),
    ("Þ", "TH"),
    ("Ꜩ", "TZ"),
    ("ÙÚÛÜŨŪŬŮŰŲƯǓǕǗǙǛȔȖɄᴜᵾṲṴṶṸṺỤỦỨỪỬỮỰ", "U"),
    ("ƲɅᴠṼṾỼꝞ", "V"),
    ("Ꝡ", "VY"),
    ("ŴǷᴡẀẂẄẆẈⱲ", "W"),
    ("ẊẌ", "X"),
    ("ÝŶŸƳȲɎʏẎỲỴỶỸỾ", "Y"),
    ("ŹŻŽƵȜȤᴢẐẒẔⱫꝢ", "Z"),
    // Lowercase letters
    ("àáâãäåāăąǎǟǡǻȁȃȧɐəɚᶏḁᶕẚạảấầẩẫậắằẳẵặₐₔⱥ", "a"),
    ("ꜳ", "aa"),
    ("æǣǽᴂ", "ae"),
    ("ꜵ", "ao"),
    ("ꜷ", "au"),
    ("ꜹꜻ", "av"),
    ("ꜽ", "ay"),
    ("ƀƃɓᵬᶀḃḅḇ", "b"),
    ("çćĉċčƈȼɕḉↄ", "c"),
    ("ðďđƌȡɖɗᵭᶁᶑḋḍḏḑḓꝺ", "d"),
    ("ǆʣʥ", "dz"),
    ("ȸ", "db"),
    ("èéêëēĕėęěǝȅȇȩɇɘɛɜɝɞʚᴈᶒᶓᶔḕḗḙḛḝẹẻẽếềểễệₑ", "e"),
    ("ƒᵮᶂḟẛꝼ", "f"),
    ("ﬀ", "ff"),
    ("ﬃ", "ffi"),
    ("ﬄ", "ffl"),
    ("ﬁ", "fi"),
    ("ﬂ", "fl"),
    ("ĝğġģǥǧǵɠɡᵷᵹᶃḡꝿꞡ", "g"),
    ("ĥħȟɥɦʮʯḣḥḧḩḫẖⱨ", "h"),
    ("ƕ", "hv"),
    ("ìíîïĩīĭįıǐȉȋɨᴉᵢᵼᶖḭḯỉịⁱ", "i"),
    ("ĳ", "ij"),
    ("ĵǰȷɉɟʄʝⱼ", "j"),
    ("ķƙǩᶄḱḳḵⱪꝁꝃꝅꞣ", "k"),
    ("ĺļľŀłƚȴɫɬɭᶅḷḹḻḽⱡꝇꝉꞁ", "l"),
    ("ǉ", "lj"),
    ("ʪ", "ls"),
    ("ʫ", "lz"),
    ("ɯɰɱᵯᶆḿṁṃ", "m"),
    ("ñńņňŉŋƞǹȵɲɳᵰᶇṅṇṉṋⁿ", "n"),
    ("ǌ", "nj"),
    ("òóôõöøōŏőơǒǫǭǿȍȏȫȭȯȱɔɵᴖᴗᶗṍṏṑṓọỏốồổỗộớờởỡợₒⱺꝋꝍ", "o"),
    ("œᴔ", "oe"),
    ("ꝏ", "oo"),
    ("ȣ", "ou"),
    ("ƥᵱᵽᶈṕṗꝑꝓꝕ", "p"),
    ("ĸɋʠꝗꝙ", "q"),
    ("ŕŗřȑȓɍɼɽɾɿᵣᵲᵳᶉṙṛṝṟꝛꞃ", "r"),
    ("śŝşšſșȿʂᵴᶊṡṣṥṧṩẜẝꞅ", "s"),
    ("ß", "ss"),
    ("ﬆ", "st"),
    ("ţťŧƫƭțȶʇʈᵵṫṭṯṱẗⱦ", "t"),
    ("þꝥꝧ", "th"),
    ("ʨ", "tc"),
    ("ʦ", "ts"),
    ("ꜩ", "tz"),
    ("ùúûüũūŭůűųưǔǖǘǚǜȕȗʉᵤᶙṳṵṷṹṻụủứừửữự", "u"),
    ("ᵫ", "ue"),
    ("ʋʌᵥᶌṽṿⱱⱴꝟ", "v"),
    ("ꝡ", "vy"),
    ("ŵƿʍẁẃẅẇẉẘⱳ", "w"),
    ("ᶍẋẍₓ", "x"),
    ("ýÿŷƴȳɏʎẏẙỳỵỷỹỿ", "y"),
    ("źżžƶȝȥɀʐʑᵶᶎẑẓẕⱬꝣ", "z"),
    // Digits
    ("⁰₀⓪⓿", "0"),
    ("¹₁➀➊", "1"),
    ("²₂➁➋", "2"),
    ("³₃➂➌", "3"),
    ("⁴₄➃➍", "4"),
    ("⁵₅➄➎", "5"),
    ("⁶₆➅➏", "6"),
    ("⁷₇➆➐", "7"),
    ("⁸₈➇➑", "8"),
    ("⁹₉➈➒", "9"),
    ("➉➓", "10"),
    // Punctuation and symbols
    ("«»“”„″‶❝❞❮❯", "\""),
    ("‘’‚‛′‵‹›❛❜", "'"),
    ("‐‑‒–—⁻₋", "-"),
    ("⁅❲", "["),
    ("⁆❳", "]"),
    ("⁽₍❨❪", "("),
    ("⸨", "(("),
    ("⁾₎❩❫", ")"),
    ("⸩", "))"),
    ("❬❰", "<"),
    ("❭❱", ">"),
    ("❴", "{"),
    ("❵", "}"),
    ("⁺₊", "+"),
    ("⁼₌", "="),
    ("⁄", "/"),
    ("⁎⁑", "*"),
    ("‼", "!!"),
    ("⁉", "!?"),
    ("⁇", "??"),
    ("⁈", "?!"),
    ("⁏", ";"),
    ("⁓", "~"),
    ("…", "..."),
    ("\u{a0}\u{2000}\u{2001}\u{2002}\u{2003}\u{2004}\u{2005}\u{2006}\u{2007}\u{2008}\u{2009}\u{200a}\u{202f}\u{205f}\u{3000}", " "),
];

#[derive(Clone, Copy)]
enum RangeForm {
    /// `①` → `1`.
    Plain,
    /// `⑴` → `(1)`.
    Parenthesized,
    /// `⒈` → `1.`.
    FullStop,
}

#[derive(Clone, Copy)]
enum RangeValue {
    /// Counts up from the given number.
    Number(u32),
    /// Counts up from the given ASCII character.
    Ascii(u8),
}

struct FoldRange {
    first: u32,
    last: u32,
    value: RangeValue,
    form: RangeForm,
}

const fn range(first: u32, last: u32, value: RangeValue, form: RangeForm) -> FoldRange {
    FoldRange {
        first,
        last,
        value,
        form,
    }
}

const RANGES: &[FoldRange] = &[
    // Enclosed alphanumerics: circled, parenthesized, full stop
    range(0x2460, 0x2473, RangeValue::Number(1), RangeForm::Plain),
    range(0x2474, 0x2487, RangeValue::Number(1), RangeForm::Parenthesized),
    range(0x2488, 0x249B, RangeValue::Number(1), RangeForm::FullStop),
    range(0x249C, 0x24B5, RangeValue::Ascii(b'a'), RangeForm::Parenthesized),
    // Circled letters
    range(0x24B6, 0x24CF, RangeValue::Ascii(b'A'), RangeForm::Plain),
    range(0x24D0, 0x24E9, RangeValue::Ascii(b'a'), RangeForm::Plain),
    // Negative circled 11-20, double circled 1-10
    range(0x24EB, 0x24F4, RangeValue::Number(11), RangeForm::Plain),
    range(0x24F5, 0x24FE, RangeValue::Number(1), RangeForm::Plain),
    range(0x2776, 0x277F, RangeValue::Number(1), RangeForm::Plain),
    // Circled numbers 21-50
    range(0x3251, 0x325F, RangeValue::Number(21), RangeForm::Plain),
    range(0x32B1, 0x32BF, RangeValue::Number(36), RangeForm::Plain),
    // Fullwidth ASCII
    range(0xFF01, 0xFF5E, RangeValue::Ascii(b'!'), RangeForm::Plain),
];

fn group_table() -> &'static HashMap<char, &'static str> {
    static TABLE: OnceLock<HashMap<char, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = HashMap::new();
        for (sources, replacement) in GROUPS {
            for ch in sources.chars() {
                table.insert(ch, *replacement);
            }
        }
        table
    })
}

fn fold_range(ch: char) -> Option<String> {
    let code = ch as u32;
    let entry = RANGES
        .iter()
        .find(|entry| (entry.first..=entry.last).contains(&code))?;
    let offset = code - entry.first;
    let body = match entry.value {
        RangeValue::Number(start) => (start + offset).to_string(),
        RangeValue::Ascii(start) => char::from_u32(start as u32 + offset)?.to_string(),
    };
    Some(match entry.form {
        RangeForm::Plain => body,
        RangeForm::Parenthesized => format!("({})", body),
        RangeForm::FullStop => format!("{}.", body),
    })
}

/// Pushes the ASCII form of `ch` onto `out`.
pub fn fold_char_into(ch: char, out: &mut String) {
    if ch.is_ascii() {
        out.push(ch);
        return;
    }
    if let Some(replacement) = group_table().get(&ch) {
        out.push_str(replacement);
        return;
    }
    match fold_range(ch) {
        Some(replacement) => out.push_str(&replacement),
        None => out.push(ch),
    }
}

pub fn fold_to_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        fold_char_into(ch, &mut out);
    }
    out
}
