//! Built-in exercise banks for all eight grammar modules.
//!
//! Hand-authored seed content the store loads at boot. Generated candidates
//! arrive separately through `ingest` and the same validation gate.

use crate::domain::{ChoiceGap, Gap, GrammarModule, Payload, Template};

const ADJECTIVE_ENDINGS: [&str; 5] = ["e", "en", "er", "es", "em"];

fn reconstruction(
    id: &str,
    module: GrammarModule,
    level: u8,
    topic: &str,
    text: &str,
    verbs: &[&str],
    clause_type: &str,
    rule: &str,
    tip: Option<&str>,
) -> Template {
    Template {
        id: id.into(),
        module,
        level,
        topic: topic.into(),
        payload: Payload::Reconstruction {
            text: text.into(),
            verbs: verbs.iter().map(|v| v.to_string()).collect(),
            clause_type: clause_type.into(),
        },
        grammar_rule: rule.into(),
        grammar_tip: tip.map(|t| t.into()),
    }
}

fn verb_position(
    id: &str,
    level: u8,
    text: &str,
    verbs: &[&str],
    clause_type: &str,
    rule: &str,
) -> Template {
    reconstruction(id, GrammarModule::VerbPosition, level, clause_type, text, verbs, clause_type, rule, None)
}

fn adjective_gap(
    id: &str,
    level: u8,
    topic: &str,
    sentence_template: &str,
    context: &str,
    answer: &str,
    article_type: &str,
    case: &str,
    gender: &str,
    full_correct: &str,
    rule: &str,
    tip: &str,
) -> Template {
    Template {
        id: id.into(),
        module: GrammarModule::Adjektive,
        level,
        topic: topic.into(),
        payload: Payload::GapFill {
            sentence_template: sentence_template.into(),
            gaps: vec![Gap {
                position: "gap_1".into(),
                context: Some(context.into()),
                answer: answer.into(),
                article_type: Some(article_type.into()),
                case: Some(case.into()),
                gender: Some(gender.into()),
                indicative_hint: None,
                options: ADJECTIVE_ENDINGS.iter().map(|o| o.to_string()).collect(),
            }],
            full_correct: full_correct.into(),
        },
        grammar_rule: rule.into(),
        grammar_tip: Some(tip.into()),
    }
}

fn konjunktiv_gap(
    id: &str,
    topic: &str,
    sentence_template: &str,
    context: &str,
    answer: &str,
    options: &[&str],
    hint: &str,
    full_correct: &str,
    rule: &str,
    tip: &str,
) -> Template {
    Template {
        id: id.into(),
        module: GrammarModule::Konjunktiv,
        level: 4,
        topic: topic.into(),
        payload: Payload::GapFill {
            sentence_template: sentence_template.into(),
            gaps: vec![Gap {
                position: "gap_1".into(),
                context: Some(context.into()),
                answer: answer.into(),
                article_type: None,
                case: None,
                gender: None,
                indicative_hint: Some(hint.into()),
                options: options.iter().map(|o| o.to_string()).collect(),
            }],
            full_correct: full_correct.into(),
        },
        grammar_rule: rule.into(),
        grammar_tip: Some(tip.into()),
    }
}

fn transformation(
    id: &str,
    module: GrammarModule,
    level: u8,
    topic: &str,
    source: &str,
    target_words: &[&str],
    correct_order: &str,
    optional_words: &[&str],
    rule: &str,
    tip: &str,
) -> Template {
    Template {
        id: id.into(),
        module,
        level,
        topic: topic.into(),
        payload: Payload::Transformation {
            source: source.into(),
            target_words: target_words.iter().map(|w| w.to_string()).collect(),
            correct_order: correct_order.into(),
            optional_words: optional_words.iter().map(|w| w.to_string()).collect(),
        },
        grammar_rule: rule.into(),
        grammar_tip: Some(tip.into()),
    }
}

fn quick_select(
    id: &str,
    level: u8,
    topic: &str,
    sentence: &str,
    options: &[&str],
    answer: &str,
    explanation: &str,
    rule: &str,
    tip: &str,
) -> Template {
    Template {
        id: id.into(),
        module: GrammarModule::Praepositionen,
        level,
        topic: topic.into(),
        payload: Payload::QuickSelect {
            sentence: sentence.into(),
            gaps: vec![ChoiceGap {
                position: "gap_1".into(),
                answer: answer.into(),
                options: options.iter().map(|o| o.to_string()).collect(),
                explanation: Some(explanation.into()),
            }],
        },
        grammar_rule: rule.into(),
        grammar_tip: Some(tip.into()),
    }
}

fn verb_position_bank() -> Vec<Template> {
    vec![
        verb_position(
            "a2_dass_01", 1,
            "Ich weiß, dass er jeden Tag Deutsch lernt.",
            &["lernt"], "dass_clause",
            "In a 'dass' clause, the conjugated verb moves to the final position.",
        ),
        verb_position(
            "a2_weil_01", 1,
            "Er bleibt zu Hause, weil er krank ist.",
            &["ist"], "weil_clause",
            "In a 'weil' clause, the conjugated verb goes to the end.",
        ),
        verb_position(
            "a2_wenn_01", 1,
            "Wenn es regnet, bleibe ich zu Hause.",
            &["regnet"], "wenn_clause",
            "In a 'wenn' clause, the verb goes to the end of that clause.",
        ),
        verb_position(
            "a2_obwohl_01", 1,
            "Er geht zur Arbeit, obwohl er müde ist.",
            &["ist"], "obwohl_clause",
            "In an 'obwohl' clause, the conjugated verb goes to the end.",
        ),
        verb_position(
            "a2_ob_01", 1,
            "Ich weiß nicht, ob er heute kommt.",
            &["kommt"], "ob_clause",
            "In an 'ob' clause, the conjugated verb goes to the end.",
        ),
        verb_position(
            "b1_perfekt_01", 2,
            "Ich weiß, dass er gestern das Buch gelesen hat.",
            &["gelesen", "hat"], "perfekt_in_nebensatz",
            "Perfekt in a subordinate clause: participle 'gelesen' + auxiliary 'hat' at the end.",
        ),
        verb_position(
            "b1_dass_modal_01", 2,
            "Sie glaubt, dass er das Problem lösen kann.",
            &["lösen", "kann"], "modal_in_nebensatz",
            "Modal 'kann' goes to the end of the subordinate clause, after the infinitive 'lösen'.",
        ),
        verb_position(
            "b1_sep_perfekt_01", 2,
            "Ich weiß, dass sie gestern sehr früh aufgestanden ist.",
            &["aufgestanden", "ist"], "separable_perfekt_nebensatz",
            "Separable verb in Perfekt in subordinate clause: participle 'aufgestanden' + auxiliary 'ist' at the end.",
        ),
        verb_position(
            "b1_nachdem_01", 2,
            "Nachdem er gegessen hatte, ging er spazieren.",
            &["gegessen", "hatte"], "nachdem_plusquamperfekt",
            "In a 'nachdem' clause with Plusquamperfekt, the auxiliary 'hatte' goes to the very end.",
        ),
        verb_position(
            "b2_nested_01", 3,
            "Er sagt, dass er weiß, dass sie morgen kommt.",
            &["weiß", "kommt"], "nested_dass",
            "Two nested 'dass' clauses: each verb goes to the end of its own clause.",
        ),
        verb_position(
            "b2_passiv_01", 3,
            "Sie sagt, dass das Haus nächstes Jahr renoviert werden soll.",
            &["renoviert", "werden", "soll"], "passiv_modal_nebensatz",
            "Passive with modal in subordinate clause: participle 'renoviert' + 'werden' + modal 'soll' stacked at the end.",
        ),
        verb_position(
            "b2_futur_neben_01", 3,
            "Sie hofft, dass er sie nächste Woche besuchen wird.",
            &["besuchen", "wird"], "futur_in_nebensatz",
            "Futur I in a subordinate clause: infinitive 'besuchen' + 'wird' at the end.",
        ),
        verb_position(
            "c1_double_inf_01", 4,
            "Ich weiß, dass er das Buch hat lesen wollen.",
            &["hat", "lesen", "wollen"], "double_infinitive",
            "Double infinitive (Ersatzinfinitiv): when a modal is in Perfekt in a subordinate clause, 'hat' comes BEFORE the two infinitives.",
        ),
        verb_position(
            "c1_triple_01", 4,
            "Er behauptet, dass er weiß, dass sie gesagt hat, dass sie kommen wird.",
            &["weiß", "gesagt", "hat", "kommen", "wird"], "triple_nested_dass",
            "Three nested dass-clauses: each verb cluster goes to the end of its own clause.",
        ),
    ]
}

fn adjektive_bank() -> Vec<Template> {
    vec![
        adjective_gap(
            "adj_001", 1, "adj_bestimmt",
            "Ich kaufe den neu{gap_1} Pullover.", "neu__", "en",
            "bestimmt", "Akkusativ", "maskulin",
            "Ich kaufe den neuen Pullover.",
            "After bestimmter Artikel, Akkusativ maskulin -> -en",
            "Bestimmter Artikel Akk. mask. -> immer -en",
        ),
        adjective_gap(
            "adj_002", 1, "adj_bestimmt",
            "Die klein{gap_1} Katze schläft auf dem Sofa.", "klein__", "e",
            "bestimmt", "Nominativ", "feminin",
            "Die kleine Katze schläft auf dem Sofa.",
            "After bestimmter Artikel, Nominativ feminin -> -e",
            "Nom./Akk. feminin + bestimmter Artikel -> -e",
        ),
        adjective_gap(
            "adj_003", 1, "adj_bestimmt",
            "Das groß{gap_1} Haus steht am Ende der Straße.", "groß__", "e",
            "bestimmt", "Nominativ", "neutrum",
            "Das große Haus steht am Ende der Straße.",
            "After bestimmter Artikel, Nominativ neutrum -> -e",
            "Nom./Akk. neutrum + bestimmter Artikel -> -e",
        ),
        adjective_gap(
            "adj_004", 1, "adj_bestimmt",
            "Er gibt dem nett{gap_1} Kind ein Geschenk.", "nett__", "en",
            "bestimmt", "Dativ", "neutrum",
            "Er gibt dem netten Kind ein Geschenk.",
            "After bestimmter Artikel, Dativ -> always -en",
            "Dativ + bestimmter Artikel -> IMMER -en",
        ),
        adjective_gap(
            "adj_006", 1, "adj_unbestimmt",
            "Ein jung{gap_1} Mann wartet an der Haltestelle.", "jung__", "er",
            "unbestimmt", "Nominativ", "maskulin",
            "Ein junger Mann wartet an der Haltestelle.",
            "After unbestimmter Artikel, Nominativ maskulin -> -er",
            "Unbestimmter Artikel Nom. mask. -> -er (shows gender)",
        ),
        adjective_gap(
            "adj_008", 1, "adj_unbestimmt",
            "Sie hat ein neu{gap_1} Auto gekauft.", "neu__", "es",
            "unbestimmt", "Akkusativ", "neutrum",
            "Sie hat ein neues Auto gekauft.",
            "After unbestimmter Artikel, Akkusativ neutrum -> -es",
            "Nom./Akk. neutrum + unbestimmter Artikel -> -es (shows gender)",
        ),
    ]
}

fn konnektoren_bank() -> Vec<Template> {
    vec![
        reconstruction(
            "kon_001", GrammarModule::Konnektoren, 1, "hauptsatz_konnektor",
            "Ich möchte ins Kino gehen, aber ich habe kein Geld.",
            &["gehen", "habe"], "aber_hauptsatz",
            "After 'aber' (Position 0), the word order stays the same: Subject-Verb.",
            Some("und/aber/oder/denn/sondern = Position 0 (no inversion)"),
        ),
        reconstruction(
            "kon_002", GrammarModule::Konnektoren, 1, "hauptsatz_konnektor",
            "Er ist müde, denn er hat die ganze Nacht gearbeitet.",
            &["hat", "gearbeitet"], "denn_hauptsatz",
            "'denn' is Position 0: no inversion, normal SVO word order follows.",
            Some("'denn' = Konjunktion (Pos. 0), 'weil' = Subjunktion (Verb-End)"),
        ),
        reconstruction(
            "kon_005", GrammarModule::Konnektoren, 2, "adverbial_konnektor",
            "Es regnet stark, deshalb bleibe ich zu Hause.",
            &["regnet", "bleibe"], "deshalb_inversion",
            "'deshalb' takes Position 1, causing inversion: Verb before Subject.",
            Some("deshalb/trotzdem/deswegen = Position 1 -> Verb-Subjekt (Inversion!)"),
        ),
        reconstruction(
            "kon_006", GrammarModule::Konnektoren, 2, "adverbial_konnektor",
            "Er war krank, trotzdem ging er zur Arbeit.",
            &["war", "ging"], "trotzdem_inversion",
            "'trotzdem' at Position 1 causes inversion: verb comes before subject.",
            Some("trotzdem = Position 1, Verb sofort danach!"),
        ),
        reconstruction(
            "kon_008", GrammarModule::Konnektoren, 2, "zweiteilig",
            "Er spricht nicht nur Deutsch, sondern auch Französisch.",
            &["spricht"], "nicht_nur_sondern_auch",
            "'nicht nur ... sondern auch': both parts must be placed correctly.",
            Some("nicht nur X, sondern auch Y: parallele Struktur!"),
        ),
        reconstruction(
            "kon_009", GrammarModule::Konnektoren, 2, "zweiteilig",
            "Entweder fahren wir ans Meer oder wir bleiben zu Hause.",
            &["fahren", "bleiben"], "entweder_oder",
            "'entweder ... oder': entweder can cause inversion in first clause.",
            Some("entweder (Pos. 1 -> Inversion) ... oder (Pos. 0 -> keine Inversion)"),
        ),
    ]
}

fn passiv_bank() -> Vec<Template> {
    vec![
        transformation(
            "pass_001", GrammarModule::Passiv, 2, "vorgangspassiv_praesens",
            "Der Architekt baut das Haus.",
            &["Das", "Haus", "wird", "vom", "Architekten", "gebaut"],
            "Das Haus wird vom Architekten gebaut.",
            &["vom", "Architekten"],
            "Vorgangspassiv Präsens: Akkusativobjekt -> Subjekt, werden + Partizip II",
            "Aktiv -> Passiv: Objekt wird Subjekt, werden + Partizip II",
        ),
        transformation(
            "pass_003", GrammarModule::Passiv, 2, "vorgangspassiv_praesens",
            "Man repariert die Straße.",
            &["Die", "Straße", "wird", "repariert"],
            "Die Straße wird repariert.",
            &[],
            "With 'man' as subject, no agent is needed in passive.",
            "man + Aktiv -> Passiv ohne Agens (kein 'von ...')",
        ),
        transformation(
            "pass_004", GrammarModule::Passiv, 2, "vorgangspassiv_praeteritum",
            "Der Koch bereitete das Essen vor.",
            &["Das", "Essen", "wurde", "vom", "Koch", "vorbereitet"],
            "Das Essen wurde vom Koch vorbereitet.",
            &["vom", "Koch"],
            "Vorgangspassiv Präteritum: wurde + Partizip II",
            "Präteritum Passiv: wurde (nicht 'wird') + Partizip II",
        ),
        transformation(
            "pass_006", GrammarModule::Passiv, 3, "passiv_modal",
            "Man muss das Problem lösen.",
            &["Das", "Problem", "muss", "gelöst", "werden"],
            "Das Problem muss gelöst werden.",
            &[],
            "Passiv mit Modalverb: Modalverb + Partizip II + werden",
            "Modal + Passiv: Subjekt + Modalverb + Partizip II + werden",
        ),
    ]
}

fn konjunktiv_bank() -> Vec<Template> {
    vec![
        reconstruction(
            "konj_001", GrammarModule::Konjunktiv, 2, "wuerde_infinitiv",
            "Wenn ich mehr Geld hätte, würde ich eine Weltreise machen.",
            &["hätte", "würde", "machen"], "konjunktiv_wenn",
            "Konjunktiv II with wenn-clause: hätte/wäre in wenn-clause, würde+Infinitiv in main clause.",
            Some("Wenn + Konj. II (hätte/wäre), Hauptsatz: würde + Infinitiv"),
        ),
        reconstruction(
            "konj_003", GrammarModule::Konjunktiv, 2, "haette_waere",
            "Wenn ich reich wäre, hätte ich ein großes Haus.",
            &["wäre", "hätte"], "konjunktiv_wenn",
            "Konjunktiv II of sein (wäre) and haben (hätte) in conditional sentences.",
            Some("sein -> wäre, haben -> hätte (immer Konjunktiv II, nie würde!)"),
        ),
        reconstruction(
            "konj_005", GrammarModule::Konjunktiv, 3, "konj2_vergangenheit",
            "Wenn ich das gewusst hätte, wäre ich früher gekommen.",
            &["gewusst", "hätte", "wäre", "gekommen"], "konjunktiv_vergangenheit",
            "Konjunktiv II Past: hätte/wäre + Partizip II for unrealized past conditions.",
            Some("Vergangenheit: hätte + Partizip II / wäre + Partizip II"),
        ),
        konjunktiv_gap(
            "konj_008", "konjunktiv_1",
            "Er sagte, er {gap_1} keine Zeit.", "er ___ keine Zeit",
            "habe", &["hat", "habe", "hätte", "hatte", "haben"],
            "er hat -> Konjunktiv I?",
            "Er sagte, er habe keine Zeit.",
            "Konjunktiv I for indirect speech: haben -> habe (3rd person singular).",
            "Konjunktiv I: er habe, sie sei, man könne (indirekte Rede)",
        ),
        konjunktiv_gap(
            "konj_009", "konjunktiv_1",
            "Die Zeitung berichtet, der Minister {gap_1} zurückgetreten.",
            "der Minister ___ zurückgetreten",
            "sei", &["ist", "sei", "wäre", "war", "sein"],
            "er ist -> Konjunktiv I?",
            "Die Zeitung berichtet, der Minister sei zurückgetreten.",
            "Konjunktiv I of 'sein' = 'sei' for reported speech.",
            "sein -> sei (Konjunktiv I, immer eindeutig!)",
        ),
        konjunktiv_gap(
            "konj_010", "konj1_vs_konj2",
            "Sie sagten, sie {gap_1} keine Zeit.", "sie ___ keine Zeit",
            "hätten", &["haben", "habe", "hätten", "hatten", "hätte"],
            "sie haben -> K1=haben (=Indikativ!) -> K2?",
            "Sie sagten, sie hätten keine Zeit.",
            "When K1 is identical to indicative (sie haben = sie haben), use K2 instead (hätten).",
            "K1 = Indikativ? -> Ersatz durch K2 (hätten statt haben)",
        ),
    ]
}

fn relativ_bank() -> Vec<Template> {
    vec![
        reconstruction(
            "rel_001", GrammarModule::Relativ, 2, "relativpronomen_nom",
            "Der Mann, der neben mir wohnt, ist Arzt.",
            &["wohnt", "ist"], "relativsatz_nom",
            "Relativpronomen 'der' = Nominativ maskulin (subject of relative clause).",
            Some("Wer/Was ist Subjekt im Relativsatz? -> Nominativ (der/die/das)"),
        ),
        reconstruction(
            "rel_002", GrammarModule::Relativ, 2, "relativpronomen_akk",
            "Das Buch, das ich gestern gekauft habe, ist sehr spannend.",
            &["gekauft", "habe", "ist"], "relativsatz_akk",
            "Relativpronomen 'das' = Akkusativ neutrum (object of relative clause).",
            Some("Was ist Objekt im Relativsatz? -> Akkusativ (den/die/das)"),
        ),
        reconstruction(
            "rel_004", GrammarModule::Relativ, 2, "relativpronomen_dat",
            "Die Frau, der ich geholfen habe, hat sich bedankt.",
            &["geholfen", "habe", "bedankt"], "relativsatz_dat",
            "Relativpronomen 'der' = Dativ feminin (helfen + Dativ).",
            Some("Dativverb (helfen, danken, gefallen) -> Dativ-Relativpronomen"),
        ),
        reconstruction(
            "rel_005", GrammarModule::Relativ, 3, "relativpronomen_praep",
            "Das Thema, über das wir gesprochen haben, ist wichtig.",
            &["gesprochen", "haben", "ist"], "relativsatz_praep",
            "Präposition + Relativpronomen: 'über das' (sprechen über + Akk.).",
            Some("Verb + Präposition -> Präposition + Relativpronomen"),
        ),
        reconstruction(
            "rel_008", GrammarModule::Relativ, 4, "relativpronomen_gen",
            "Der Autor, dessen Buch ich gelesen habe, kommt aus Berlin.",
            &["gelesen", "habe", "kommt"], "relativsatz_genitiv",
            "Genitiv-Relativpronomen 'dessen' (mask./neutrum) / 'deren' (fem./plural).",
            Some("Genitiv: dessen (mask./neutr.) / deren (fem./plural)"),
        ),
    ]
}

fn praepositionen_bank() -> Vec<Template> {
    vec![
        quick_select(
            "praep_001", 1, "wechselpraep",
            "Die Katze springt {gap_1} Tisch.",
            &["auf den", "auf dem", "auf das"], "auf den",
            "Wohin? -> Akkusativ (Bewegung mit Richtung). Tisch = maskulin -> den",
            "Wechselpräpositionen: Wohin? -> Akkusativ, Wo? -> Dativ",
            "Wohin? = Akkusativ (Bewegung), Wo? = Dativ (Position)",
        ),
        quick_select(
            "praep_002", 1, "wechselpraep",
            "Die Katze sitzt {gap_1} Tisch.",
            &["auf den", "auf dem", "auf das"], "auf dem",
            "Wo? -> Dativ (keine Bewegung, Position). Tisch = maskulin -> dem",
            "Wechselpräpositionen: Wo? -> Dativ (Position/Zustand)",
            "sitzen/liegen/stehen/hängen = Wo? = Dativ",
        ),
        quick_select(
            "praep_003", 1, "wechselpraep",
            "Ich gehe {gap_1} Küche.",
            &["in die", "in der", "in das"], "in die",
            "Wohin? -> Akkusativ. Küche = feminin -> die",
            "Wechselpräpositionen: gehen -> Wohin? -> Akkusativ",
            "gehen/legen/stellen/setzen = Wohin? = Akkusativ",
        ),
        quick_select(
            "praep_005", 1, "feste_praep",
            "Ich warte {gap_1} Bus.",
            &["auf den", "für den", "an den"], "auf den",
            "warten auf + Akkusativ. Bus = maskulin -> den",
            "warten auf + Akkusativ (fixed preposition)",
            "warten AUF + Akk., sich freuen AUF + Akk. (Zukunft)",
        ),
        quick_select(
            "praep_007", 2, "genitiv_praep",
            "{gap_1} Regens bleiben wir zu Hause.",
            &["Wegen des", "Wegen dem", "Wegen den"], "Wegen des",
            "wegen + Genitiv. Regen = maskulin -> des Regens",
            "wegen + Genitiv (formal German)",
            "wegen/trotz/während/statt + Genitiv (Schriftsprache)",
        ),
    ]
}

fn nominalisierung_bank() -> Vec<Template> {
    vec![
        transformation(
            "nom_001", GrammarModule::Nominalisierung, 3, "nebensatz_zu_nominal",
            "Weil es stark regnet, bleiben wir zu Hause.",
            &["Wegen", "des", "starken", "Regens", "bleiben", "wir", "zu", "Hause"],
            "Wegen des starken Regens bleiben wir zu Hause.",
            &[],
            "weil + Verb -> wegen + Genitiv-Nomen (Nominalisierung)",
            "weil es regnet -> wegen des Regens",
        ),
        transformation(
            "nom_002", GrammarModule::Nominalisierung, 3, "nebensatz_zu_nominal",
            "Obwohl das Wetter schlecht ist, gehen wir spazieren.",
            &["Trotz", "des", "schlechten", "Wetters", "gehen", "wir", "spazieren"],
            "Trotz des schlechten Wetters gehen wir spazieren.",
            &[],
            "obwohl + Satz -> trotz + Genitiv (Nominalisierung)",
            "obwohl ... -> trotz + Genitiv",
        ),
        transformation(
            "nom_003", GrammarModule::Nominalisierung, 3, "nebensatz_zu_nominal",
            "Während er studierte, arbeitete er auch.",
            &["Während", "des", "Studiums", "arbeitete", "er", "auch"],
            "Während des Studiums arbeitete er auch.",
            &[],
            "während + Nebensatz -> während + Genitiv-Nomen",
            "während er studierte -> während des Studiums",
        ),
        transformation(
            "nom_004", GrammarModule::Nominalisierung, 3, "infinitivsatz",
            "Er arbeitet viel. Er will erfolgreich sein.",
            &["Er", "arbeitet", "viel", "um", "erfolgreich", "zu", "sein"],
            "Er arbeitet viel, um erfolgreich zu sein.",
            &[],
            "Purpose clause: um ... zu + Infinitiv (= damit + Nebensatz)",
            "um ... zu + Infinitiv = Zweck/Ziel (gleiches Subjekt!)",
        ),
    ]
}

/// All built-in templates across the eight modules.
pub fn seed_templates() -> Vec<Template> {
    let mut templates = Vec::new();
    templates.extend(verb_position_bank());
    templates.extend(adjektive_bank());
    templates.extend(konnektoren_bank());
    templates.extend(passiv_bank());
    templates.extend(konjunktiv_bank());
    templates.extend(relativ_bank());
    templates.extend(praepositionen_bank());
    templates.extend(nominalisierung_bank());
    templates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::validate;
    use std::collections::HashSet;

    #[test]
    fn test_every_seed_template_is_valid() {
        for template in seed_templates() {
            if let Err(e) = validate(&template) {
                panic!("seed template failed validation: {}", e);
            }
        }
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let templates = seed_templates();
        let ids: HashSet<&str> = templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), templates.len());
    }

    #[test]
    fn test_every_module_and_level_band_is_covered() {
        let templates = seed_templates();
        for module in GrammarModule::ALL {
            let of_module: Vec<_> = templates.iter().filter(|t| t.module == module).collect();
            assert!(!of_module.is_empty(), "no seeds for {}", module.name_en());
            for t in &of_module {
                assert!(
                    module.levels().contains(&t.level),
                    "{} outside level band of {}",
                    t.id,
                    module.name_en()
                );
            }
        }
    }
}
