//! Shared test documents and a tagger lexicon that covers their open-class
//! words.

use crate::nlp::tagger::LexiconTagger;

pub const STOCK_EXCHANGE: &str = "\
The London Stock Exchange is a stock exchange located in London, United Kingdom.
Founded in 1801, it is one of the largest stock exchanges in the world, with many
overseas listings as well as British companies. The exchange is part of the
London Stock Exchange Group and so sometimes referred to by the ticker symbol
for the group, LSE. Its current premises are situated in Paternoster Square
close to St Paul's Cathedral in the City of London
";

pub const PARADES_COMMISSION: &str = "\
Secretary of State Owen Paterson has appointed Peter Osborne as Chair of the
Parades Commission for Northern Ireland and six new Commission members.
";

pub const JERUSALEM_THEATRE: &str = "\
Police shut Palestinian theatre in Jerusalem.

Israeli police have shut down a Palestinian theatre in East Jerusalem.

The action, on Thursday, prevented the closing event of an international
literature festival from taking place.

Police said they were acting on a court order, issued after intelligence
indicated that the Palestinian Authority was involved in the event.

Israel has occupied East Jerusalem since 1967 and has annexed the
area. This is not recognised by the international community.

The British consul-general in Jerusalem , Richard Makepeace, was
attending the event.

\"I think all lovers of literature would regard this as a very
regrettable moment and regrettable decision,\" he added.

Mr Makepeace said the festival's closing event would be reorganised to
take place at the British Council in Jerusalem.

The Israeli authorities often take action against events in East
Jerusalem they see as connected to the Palestinian Authority.

Saturday's opening event at the same theatre was also shut down.

A police notice said the closure was on the orders of Israel's internal
security minister on the grounds of a breach of interim peace accords
from the 1990s.

These laid the framework for talks on establishing a Palestinian state
alongside Israel, but left the status of Jerusalem to be determined by
further negotiation.

Israel has annexed East Jerusalem and declares it part of its eternal
capital.

Palestinians hope to establish their capital in the area.
";

/// Terms the default configuration must find in [`JERUSALEM_THEATRE`]
pub const JERUSALEM_TERMS: &[&str] = &[
    "British Council",
    "British consul-general",
    "East Jerusalem",
    "Israel",
    "Israeli authorities",
    "Israeli police",
    "Mr Makepeace",
    "Palestinian Authority",
    "Palestinian state",
    "Palestinian theatre",
    "Palestinians hope",
    "Richard Makepeace",
    "court order",
    "literature festival",
    "peace accords",
    "police notice",
    "security minister",
];

/// Open-class words from the documents above that the fallback rules would
/// mis-tag
const FIXTURE_LEXICON: &str = "\
shut VBD VBN
down RP
international JJ
think VBP
regard VB
regrettable JJ
take VB
same JJ
opening NN VBG
internal JJ
interim JJ
laid VBD
alongside IN
left VBD
further JJ
declares VBZ
eternal JJ
establish VB
see VBP
close RB JJ
six CD
new JJ
located VBN
sometimes RB
referred VBN
current JJ
situated VBN
many JJ
largest JJS
overseas JJ
well RB
one CD
";

pub fn tagger() -> LexiconTagger {
    let mut tagger = LexiconTagger::new();
    tagger
        .load_lexicon(FIXTURE_LEXICON)
        .expect("fixture lexicon parses");
    tagger
}
