// Turkish morphotactics
//
// The morpheme state graph of Turkish word formation. States are declared
// up front (one table for morphemes, one for states) and then connected per
// word class: nouns, last-vowel-drop words, proper nouns, adjectives,
// numerals, the copular verb after nominals, pronouns, adverbs and closed
// classes, verbs, the question particle and `imek`.
//
// Epsilon edges out of terminal states that lead into a derivation carry a
// `HasTail` condition so a bare root never ends in an empty derivation.

use log::info;
use turkmorph_core::{DictionaryItem, PhoneticAttribute, PhoneticAttributes, PrimaryPos, RootAttribute, SecondaryPos};
use turkmorph_fst::graph::GraphError;
use turkmorph_fst::{Condition, Graph, GraphBuilder, MorphemeId, Morphotactics, StateId};

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

macro_rules! morphemes {
    ($($field:ident: $ctor:ident($($arg:expr),+);)*) => {
        struct Morphemes {
            $($field: MorphemeId,)*
        }

        impl Morphemes {
            fn declare(b: &mut GraphBuilder) -> Self {
                Self {
                    $($field: b.$ctor($($arg),+),)*
                }
            }
        }
    };
}

macro_rules! states {
    ($($field:ident: $ctor:ident($name:literal, $morpheme:ident);)*) => {
        struct States {
            $($field: StateId,)*
        }

        impl States {
            fn declare(b: &mut GraphBuilder, m: &Morphemes) -> Self {
                Self {
                    $($field: $ctor(b, $name, m.$morpheme),)*
                }
            }
        }
    };
}

morphemes! {
    // word classes
    noun: pos_morpheme("Noun", "Noun", PrimaryPos::Noun);
    adj: pos_morpheme("Adjective", "Adj", PrimaryPos::Adjective);
    verb: pos_morpheme("Verb", "Verb", PrimaryPos::Verb);
    pron: pos_morpheme("Pronoun", "Pron", PrimaryPos::Pronoun);
    adv: pos_morpheme("Adverb", "Adv", PrimaryPos::Adverb);
    conj: pos_morpheme("Conjunction", "Conj", PrimaryPos::Conjunction);
    punc: pos_morpheme("Punctuation", "Punc", PrimaryPos::Punctuation);
    ques: pos_morpheme("Question", "Ques", PrimaryPos::Question);
    postp: pos_morpheme("PostPositive", "Postp", PrimaryPos::PostPositive);
    det: pos_morpheme("Determiner", "Det", PrimaryPos::Determiner);
    num: pos_morpheme("Numeral", "Num", PrimaryPos::Numeral);
    dup: pos_morpheme("Duplicator", "Dup", PrimaryPos::Duplicator);
    interj: pos_morpheme("Interjection", "Interj", PrimaryPos::Interjection);

    // agreement
    a1sg: morpheme("FirstPersonSingular", "A1sg");
    a2sg: morpheme("SecondPersonSingular", "A2sg");
    a3sg: morpheme("ThirdPersonSingular", "A3sg");
    a1pl: morpheme("FirstPersonPlural", "A1pl");
    a2pl: morpheme("SecondPersonPlural", "A2pl");
    a3pl: morpheme("ThirdPersonPlural", "A3pl");

    // possession
    pnon: hidden_morpheme("NoPosession", "Pnon");
    p1sg: morpheme("FirstPersonSingularPossessive", "P1sg");
    p2sg: morpheme("SecondPersonSingularPossessive", "P2sg");
    p3sg: morpheme("ThirdPersonSingularPossessive", "P3sg");
    p1pl: morpheme("FirstPersonPluralPossessive", "P1pl");
    p2pl: morpheme("SecondPersonPluralPossessive", "P2pl");
    p3pl: morpheme("ThirdPersonPluralPossessive", "P3pl");

    // case
    nom: hidden_morpheme("Nominal", "Nom");
    dat: morpheme("Dative", "Dat");
    acc: morpheme("Accusative", "Acc");
    abl: morpheme("Ablative", "Abl");
    loc: morpheme("Locative", "Loc");
    ins: morpheme("Instrumental", "Ins");
    genitive: morpheme("Genitive", "Gen");
    equ: morpheme("Equ", "Equ");

    // derivations
    dim: derivational("Diminutive", "Dim");
    ness: derivational("Ness", "Ness");
    with: derivational("With", "With");
    without: derivational("Without", "Without");
    related: derivational("Related", "Related");
    just_like: derivational("JustLike", "JustLike");
    rel: derivational("Relation", "Rel");
    agt: derivational("Agentive", "Agt");
    become_verb: derivational("Become", "Become");
    acquire: derivational("Acquire", "Acquire");
    ly: derivational("Ly", "Ly");
    as_if: derivational("AsIf", "AsIf");
    caus: derivational("Causative", "Caus");
    able: derivational("Ability", "Able");
    pass: derivational("Passive", "Pass");
    inf1: derivational("Infinitive1", "Inf1");
    inf2: derivational("Infinitive2", "Inf2");
    zero: derivational("Zero", "Zero");
    while_: derivational("While", "While");

    // verb inflection
    cop: morpheme("Copula", "Cop");
    neg: morpheme("Negative", "Neg");
    pres: morpheme("PresentTense", "Pres");
    past: morpheme("PastTense", "Past");
    narr: morpheme("NarrativeTense", "Narr");
    cond: morpheme("Condition", "Cond");
    prog1: morpheme("Progressive1", "Prog1");
    aor: morpheme("Aorist", "Aor");
    fut: morpheme("Future", "Fut");
    imp: morpheme("Imperative", "Imp");
    opt: morpheme("Optative", "Opt");
    desr: morpheme("Desire", "Desr");
    neces: morpheme("Necessity", "Neces");
}

fn terminal(b: &mut GraphBuilder, name: &str, m: MorphemeId) -> StateId {
    b.terminal(name, m)
}

fn non_terminal(b: &mut GraphBuilder, name: &str, m: MorphemeId) -> StateId {
    b.non_terminal(name, m)
}

fn derivative(b: &mut GraphBuilder, name: &str, m: MorphemeId) -> StateId {
    b.non_terminal_derivative(name, m)
}

fn root(b: &mut GraphBuilder, name: &str, m: MorphemeId) -> StateId {
    let s = b.non_terminal(name, m);
    b.pos_root(s)
}

fn terminal_root(b: &mut GraphBuilder, name: &str, m: MorphemeId) -> StateId {
    let s = b.terminal(name, m);
    b.pos_root(s)
}

states! {
    // -- nouns
    noun: root("noun_S", noun);
    noun_compound_root: root("nounCompoundRoot_S", noun);
    noun_proper: root("nounProper_S", noun);
    noun_abbrv: root("nounAbbrv_S", noun);
    noun_su_root: root("nounSuRoot_S", noun);
    noun_inf1_root: root("nounInf1Root_S", noun);

    a3sg: non_terminal("a3sg_S", a3sg);
    a3sg_compound: non_terminal("a3sgCompound_S", a3sg);
    a3sg_su: non_terminal("a3sgSu_S", a3sg);
    a3sg_inf1: non_terminal("a3sgInf1_S", a3sg);
    a3pl: non_terminal("a3pl_S", a3pl);
    a3pl_compound: non_terminal("a3plCompound_S", a3pl);
    a3pl_compound2: non_terminal("a3plCompound2_S", a3pl);

    pnon: non_terminal("pnon_S", pnon);
    pnon_compound: non_terminal("pnonCompound_S", pnon);
    pnon_compound2: non_terminal("pnonCompound2_S", pnon);
    pnon_inf1: non_terminal("pnonInf1_S", pnon);
    p1sg: non_terminal("p1sg_S", p1sg);
    p2sg: non_terminal("p2sg_S", p2sg);
    p3sg: non_terminal("p3sg_S", p3sg);
    p1pl: non_terminal("p1pl_S", p1pl);
    p2pl: non_terminal("p2pl_S", p2pl);
    p3pl: non_terminal("p3pl_S", p3pl);

    nom_st: terminal("nom_ST", nom);
    nom: non_terminal("nom_S", nom);
    dat_st: terminal("dat_ST", dat);
    abl_st: terminal("abl_ST", abl);
    loc_st: terminal("loc_ST", loc);
    ins_st: terminal("ins_ST", ins);
    acc_st: terminal("acc_ST", acc);
    gen_st: terminal("gen_ST", genitive);
    equ_st: terminal("equ_ST", equ);

    dim: derivative("dim_S", dim);
    ness: derivative("ness_S", ness);
    agt: derivative("agt_S", agt);
    with: derivative("with_S", with);
    without: derivative("without_S", without);
    related: derivative("related_S", related);
    just_like: derivative("justLike_S", just_like);
    rel: derivative("rel_S", rel);
    become_verb: derivative("become_S", become_verb);
    acquire: derivative("acquire_S", acquire);
    noun_zero_deriv: derivative("nounZeroDeriv_S", zero);

    // -- içeri, dışarı and friends
    noun_lvd_root: root("nounLastVowelDropRoot_S", noun);
    adj_lvd_root: root("adjLastVowelDropRoot_S", adj);
    a3pl_lvd: non_terminal("a3PlLastVowelDrop_S", a3pl);
    a3sg_lvd: non_terminal("a3sgLastVowelDrop_S", a3sg);
    pnon_lvd: non_terminal("pNonLastVowelDrop_S", pnon);
    zero_lvd: derivative("zeroLastVowelDrop_S", zero);

    // -- adjectives and numerals
    adjective_root: terminal_root("adjectiveRoot_ST", adj);
    adj_zero_deriv: derivative("adjZeroDeriv_S", zero);
    a_ly: derivative("aLy_S", ly);
    a_as_if: derivative("aAsIf_S", as_if);
    a_agt: derivative("aAgt_S", agt);
    numeral_root: terminal_root("numeralRoot_ST", num);
    num_zero_deriv: derivative("numZeroDeriv_S", zero);

    // -- copular verb after nominals
    n_verb: root("nVerb_S", verb);
    n_verb_degil: root("nVerbDegil_S", verb);
    n_present: non_terminal("nPresent_S", pres);
    n_past: non_terminal("nPast_S", past);
    n_narr: non_terminal("nNarr_S", narr);
    n_cond: non_terminal("nCond_S", cond);
    n_a1sg: terminal("nA1sg_ST", a1sg);
    n_a2sg: terminal("nA2sg_ST", a2sg);
    n_a1pl: terminal("nA1pl_ST", a1pl);
    n_a2pl: terminal("nA2pl_ST", a2pl);
    n_a3sg_st: terminal("nA3sg_ST", a3sg);
    n_a3sg: non_terminal("nA3sg_S", a3sg);
    n_a3pl: terminal("nA3pl_ST", a3pl);
    n_cop: terminal("nCop_ST", cop);
    n_cop_before_a3pl: non_terminal("nCopBeforeA3pl_S", cop);
    n_neg: non_terminal("nNeg_S", neg);

    // -- pronouns
    pron_pers: root("pronPers_S", pron);
    pron_pers_mod: root("pronPers_Mod_S", pron);
    pron_demons: root("pronDemons_S", pron);
    pron_quant: root("pronQuant_S", pron);
    pron_quant_modified: root("pronQuantModified_S", pron);
    pron_ques: root("pronQues_S", pron);
    pron_reflex: root("pronReflex_S", pron);

    p_a1sg: non_terminal("pA1sg_S", a1sg);
    p_a2sg: non_terminal("pA2sg_S", a2sg);
    p_a1sg_mod: non_terminal("pA1sgMod_S", a1sg);
    p_a2sg_mod: non_terminal("pA2sgMod_S", a2sg);
    p_a3sg: non_terminal("pA3sg_S", a3sg);
    p_a1pl: non_terminal("pA1pl_S", a1pl);
    p_a2pl: non_terminal("pA2pl_S", a2pl);
    p_a3pl: non_terminal("pA3pl_S", a3pl);

    p_quant_a3sg: non_terminal("pQuantA3sg_S", a3sg);
    p_quant_a3pl: non_terminal("pQuantA3pl_S", a3pl);
    p_quant_mod_a3pl: non_terminal("pQuantModA3pl_S", a3pl);
    p_quant_a1pl: non_terminal("pQuantA1pl_S", a1pl);
    p_quant_a2pl: non_terminal("pQuantA2pl_S", a2pl);
    p_ques_a3sg: non_terminal("pQuesA3sg_S", a3sg);
    p_ques_a3pl: non_terminal("pQuesA3pl_S", a3pl);
    p_reflex_a1sg: non_terminal("pReflexA1sg_S", a1sg);
    p_reflex_a2sg: non_terminal("pReflexA2sg_S", a2sg);
    p_reflex_a3sg: non_terminal("pReflexA3sg_S", a3sg);
    p_reflex_a1pl: non_terminal("pReflexA1pl_S", a1pl);
    p_reflex_a2pl: non_terminal("pReflexA2pl_S", a2pl);
    p_reflex_a3pl: non_terminal("pReflexA3pl_S", a3pl);

    p_pnon: non_terminal("pPnon_S", pnon);
    p_pnon_mod: non_terminal("pPnonMod_S", pnon);
    p_p1sg: non_terminal("pP1sg_S", p1sg);
    p_p2sg: non_terminal("pP2sg_S", p2sg);
    p_p3sg: non_terminal("pP3sg_S", p3sg);
    p_p1pl: non_terminal("pP1pl_S", p1pl);
    p_p2pl: non_terminal("pP2pl_S", p2pl);
    p_p3pl: non_terminal("pP3pl_S", p3pl);

    p_nom: terminal("pNom_ST", nom);
    p_dat: terminal("pDat_ST", dat);
    p_acc: terminal("pAcc_ST", acc);
    p_abl: terminal("pAbl_ST", abl);
    p_loc: terminal("pLoc_ST", loc);
    p_gen: terminal("pGen_ST", genitive);
    p_ins: terminal("pIns_ST", ins);
    p_equ: terminal("pEqu_ST", equ);
    pron_zero_deriv: derivative("pronZeroDeriv_S", zero);

    // -- adverbs and closed classes
    adv_root: terminal_root("advRoot_ST", adv);
    adv_for_verb_deriv: terminal_root("advForVerbDeriv_ST", adv);
    av_zero_to_verb: derivative("avZeroToVerb_S", zero);
    conj_root: terminal_root("conjRoot_ST", conj);
    interj_root: terminal_root("interjRoot_ST", interj);
    det_root: terminal_root("detRoot_ST", det);
    dup_root: terminal_root("dupRoot_ST", dup);
    punc_root: terminal_root("puncRoot_ST", punc);
    postp_root: terminal_root("postpRoot_ST", postp);
    postp_zero: derivative("postpZero_S", zero);

    // -- verbs
    verb_root: root("verbRoot_S", verb);
    verb_lvd_mod: root("verbLastVowelDropModRoot_S", verb);
    verb_lvd_unmod: root("verbLastVowelDropUnmodRoot_S", verb);
    verb_vowel_drop: root("verbRoot_VowelDrop_S", verb);
    de_ye_root: root("vDeYeRoot_S", verb);

    v_a1sg: terminal("vA1sg_ST", a1sg);
    v_a2sg: terminal("vA2sg_ST", a2sg);
    v_a3sg: terminal("vA3sg_ST", a3sg);
    v_a1pl: terminal("vA1pl_ST", a1pl);
    v_a2pl: terminal("vA2pl_ST", a2pl);
    v_a3pl: terminal("vA3pl_ST", a3pl);

    v_imp: non_terminal("vImp_S", imp);
    v_imp_ye: non_terminal("vImpYemekYe_S", imp);
    v_imp_yi: non_terminal("vImpYemekYi_S", imp);
    v_caus_t: derivative("vCausT_S", caus);
    v_caus_tir: derivative("vCausTır_S", caus);
    v_prog_yor: non_terminal("vProgYor_S", prog1);
    v_aor: non_terminal("vAor_S", aor);
    v_neg: non_terminal("vNeg_S", neg);
    v_neg_prog1: non_terminal("vNegProg1_S", neg);
    v_aor_neg: non_terminal("vAorNeg_S", aor);
    v_aor_neg_empty: non_terminal("vAorNegEmpty_S", aor);
    v_able: derivative("vAble_S", able);
    v_pass: derivative("vPass_S", pass);
    v_inf1: derivative("vInf1_S", inf1);
    v_inf2: derivative("vInf2_S", inf2);
    v_past: non_terminal("vPast_S", past);
    v_narr: non_terminal("vNarr_S", narr);
    v_fut: non_terminal("vFut_S", fut);
    v_cond: non_terminal("vCond_S", cond);
    v_opt: non_terminal("vOpt_S", opt);
    v_desr: non_terminal("vDesr_S", desr);
    v_neces: non_terminal("vNeces_S", neces);
    v_past_after_tense: non_terminal("vPastAfterTense_S", past);
    v_narr_after_tense: non_terminal("vNarrAfterTense_S", narr);
    v_cop_before_a3pl: non_terminal("vCopBeforeA3pl_S", cop);
    v_cop: terminal("vCop_ST", cop);
    v_while: derivative("vWhile_S", while_);

    // -- question particle
    question_root: root("questionRoot_S", ques);
    q_present: non_terminal("qPresent_S", pres);
    q_past: non_terminal("qPast_S", past);
    q_narr: non_terminal("qNarr_S", narr);
    q_a1sg: terminal("qA1sg_ST", a1sg);
    q_a2sg: terminal("qA2sg_ST", a2sg);
    q_a3sg: terminal("qA3sg_ST", a3sg);
    q_a1pl: terminal("qA1pl_ST", a1pl);
    q_a2pl: terminal("qA2pl_ST", a2pl);
    q_a3pl: terminal("qA3pl_ST", a3pl);
    q_cop: terminal("qCop_ST", cop);

    // -- imek
    imek_root: root("imekRoot_S", verb);
    imek_past: non_terminal("imekPast_S", past);
    imek_narr: non_terminal("imekNarr_S", narr);
    imek_cond: non_terminal("imekCond_S", cond);
    imek_a1sg: terminal("imekA1sg_ST", a1sg);
    imek_a2sg: terminal("imekA2sg_ST", a2sg);
    imek_a3sg: terminal("imekA3sg_ST", a3sg);
    imek_a1pl: terminal("imekA1pl_ST", a1pl);
    imek_a2pl: terminal("imekA2pl_ST", a2pl);
    imek_a3pl: terminal("imekA3pl_ST", a3pl);
    imek_cop: terminal("imekCop_ST", cop);
}

// ---------------------------------------------------------------------------
// Morphotactics
// ---------------------------------------------------------------------------

/// The Turkish morpheme graph and its root state selection.
pub struct TurkishMorphotactics {
    graph: Graph,
    states: States,
}

impl TurkishMorphotactics {
    /// Declare and connect every state, then freeze the graph.
    pub fn new() -> Result<Self, GraphError> {
        let mut b = GraphBuilder::new();
        let m = Morphemes::declare(&mut b);
        let s = States::declare(&mut b, &m);

        connect_nouns(&mut b, &s, &m);
        connect_last_vowel_drop_words(&mut b, &s);
        connect_proper_nouns_and_abbreviations(&mut b, &s);
        connect_adjectives(&mut b, &s, &m);
        connect_numerals(&mut b, &s, &m);
        connect_verb_after_nominals(&mut b, &s, &m);
        connect_pronouns(&mut b, &s, &m);
        connect_adverbs_and_closed_classes(&mut b, &s);
        connect_verbs(&mut b, &s, &m);
        connect_question(&mut b, &s);
        connect_imek(&mut b, &s);
        connect_post_processing(&mut b, &s, &m);

        let graph = b.build()?;
        info!(
            "morphotactics: {} morphemes, {} states, {} transitions",
            graph.morpheme_count(),
            graph.state_count(),
            graph.transition_count()
        );
        Ok(Self { graph, states: s })
    }

    /// State with the given name, e.g. `noun_S`.
    pub fn state(&self, name: &str) -> Option<StateId> {
        self.graph.state_by_name(name)
    }
}

impl Morphotactics for TurkishMorphotactics {
    fn graph(&self) -> &Graph {
        &self.graph
    }

    fn root_state(&self, item: &DictionaryItem, attributes: PhoneticAttributes) -> StateId {
        let s = &self.states;
        match item.id.as_str() {
            "değil_Verb" => return s.n_verb_degil,
            "imek_Verb" => return s.imek_root,
            "su_Noun" | "akarsu_Noun" => return s.noun_su_root,
            "öyle_Adv" | "böyle_Adv" | "şöyle_Adv" => return s.adv_for_verb_deriv,
            _ => {}
        }
        if attributes.contains(PhoneticAttribute::LastLetterDropped) {
            return s.verb_vowel_drop;
        }
        match item.primary_pos {
            PrimaryPos::Noun => match item.secondary_pos {
                SecondaryPos::ProperNoun
                | SecondaryPos::Email
                | SecondaryPos::Url
                | SecondaryPos::HashTag
                | SecondaryPos::Mention => s.noun_proper,
                SecondaryPos::Abbreviation => s.noun_abbrv,
                _ if item.has_attribute(RootAttribute::CompoundP3sgRoot) => s.noun_compound_root,
                _ => s.noun,
            },
            PrimaryPos::Adjective => s.adjective_root,
            PrimaryPos::Pronoun => match item.secondary_pos {
                SecondaryPos::PersonalPron => s.pron_pers,
                SecondaryPos::DemonstrativePron => s.pron_demons,
                SecondaryPos::QuestionPron => s.pron_ques,
                SecondaryPos::ReflexivePron => s.pron_reflex,
                _ => s.pron_quant,
            },
            PrimaryPos::Adverb => s.adv_root,
            PrimaryPos::Conjunction => s.conj_root,
            PrimaryPos::Question => s.question_root,
            PrimaryPos::Interjection => s.interj_root,
            PrimaryPos::Verb => s.verb_root,
            PrimaryPos::Punctuation => s.punc_root,
            PrimaryPos::Determiner => s.det_root,
            PrimaryPos::PostPositive => s.postp_root,
            PrimaryPos::Numeral => s.numeral_root,
            PrimaryPos::Duplicator => s.dup_root,
            PrimaryPos::Unknown => s.noun,
        }
    }
}

// ---------------------------------------------------------------------------
// Nouns
// ---------------------------------------------------------------------------

fn connect_nouns(b: &mut GraphBuilder, s: &States, m: &Morphemes) {
    use RootAttribute::*;

    let abbreviation = Condition::secondary_pos_is(SecondaryPos::Abbreviation);
    let no_surface = !Condition::HasAnySuffixSurface;
    let group_empty = Condition::NoSurfaceAfterDerivation;

    // number
    b.add_empty_if(s.noun, s.a3sg, Condition::not_have_root(ImplicitPlural))
        .add_if(
            s.noun,
            s.a3pl,
            "lAr",
            Condition::not_have_root(ImplicitPlural).and(Condition::not_have_root(CompoundP3sg)),
        )
        .add_empty_if(s.noun, s.a3pl, Condition::has_root(ImplicitPlural));

    // compound roots: zeytinyağ-
    let compound_root = Condition::has_root(CompoundP3sgRoot);
    b.add_empty_if(s.noun_compound_root, s.a3sg_compound, compound_root.clone())
        .add_if(s.noun_compound_root, s.a3pl_compound, "lAr", compound_root.clone())
        .add_if(s.noun_compound_root, s.a3pl_compound2, "lArI", compound_root);
    b.add_empty(s.a3sg_compound, s.pnon_compound)
        .add(s.a3sg_compound, s.p3pl, "lArI");
    b.add_empty(s.pnon_compound, s.nom);

    let with_or_without = Condition::contains_morpheme(&[m.with, m.without]);
    let contains_ness = Condition::contains_morpheme(&[m.ness]);
    b.add(s.nom, s.become_verb, "lAş")
        .add(s.nom, s.acquire, "lAn")
        .add_if(s.nom, s.with, "lI", !with_or_without.clone())
        .add_if(s.nom, s.without, "sIz", !with_or_without.clone())
        .add_if(s.nom, s.ness, "lI~k", !contains_ness.clone())
        .add_if(s.nom, s.ness, "lI!ğ", !contains_ness.clone())
        .add_if(s.nom, s.agt, ">cI", !Condition::contains_morpheme(&[m.agt]))
        .add_if(s.nom, s.just_like, "+msI", !Condition::contains_morpheme(&[m.just_like]));
    let dim_once = no_surface.clone().and_not(Condition::contains_morpheme(&[m.dim]));
    b.add_if(s.nom, s.dim, ">cI~k", dim_once.clone())
        .add_if(s.nom, s.dim, ">cI!ğ", dim_once)
        .add_if(s.nom, s.dim, "cAğIz", no_surface.clone());

    b.add(s.a3pl_compound, s.p3sg, "I")
        .add(s.a3pl_compound, s.p2sg, "In")
        .add(s.a3pl_compound, s.p1sg, "Im")
        .add(s.a3pl_compound, s.p1pl, "ImIz")
        .add(s.a3pl_compound, s.p2pl, "InIz")
        .add(s.a3pl_compound, s.p3pl, "I");
    b.add_empty(s.a3pl_compound2, s.pnon_compound2);
    b.add_empty(s.pnon_compound2, s.nom_st);

    // possession
    let no_family = Condition::not_have_root(FamilyMember);
    let possession = no_family.clone().and_not(abbreviation.clone());
    let after_just_like = Condition::PreviousGroupContainsMorpheme(vec![m.just_like]);
    b.add_empty_if(s.a3sg, s.pnon, no_family.clone())
        .add_if(s.a3sg, s.p1sg, "Im", possession.clone())
        .add_if(s.a3sg, s.p2sg, "In", possession.clone().and_not(after_just_like.clone()))
        .add_if(s.a3sg, s.p3sg, "+sI", possession.clone())
        .add_empty_if(s.a3sg, s.p3sg, Condition::has_root(CompoundP3sg))
        .add_if(s.a3sg, s.p1pl, "ImIz", possession.clone())
        .add_if(s.a3sg, s.p2pl, "InIz", possession.clone().and_not(after_just_like))
        .add_if(s.a3sg, s.p3pl, "lArI", possession.clone());

    b.add_empty_if(s.a3pl, s.pnon, no_family.clone())
        .add_if(s.a3pl, s.p1sg, "Im", possession.clone())
        .add_if(s.a3pl, s.p2sg, "In", possession.clone())
        .add_empty_if(s.a3pl, s.p1sg, Condition::has_root(ImplicitP1sg))
        .add_empty_if(s.a3pl, s.p2sg, Condition::has_root(ImplicitP2sg))
        .add_if(s.a3pl, s.p3sg, "I", possession.clone())
        .add_if(s.a3pl, s.p1pl, "ImIz", possession.clone())
        .add_if(s.a3pl, s.p2pl, "InIz", possession.clone())
        .add_if(s.a3pl, s.p3pl, "I", possession);

    // su, akarsu
    b.add_empty(s.noun_su_root, s.a3sg_su)
        .add(s.noun_su_root, s.a3pl, "lar");
    b.add_empty(s.a3sg_su, s.pnon)
        .add(s.a3sg_su, s.p1sg, "yum")
        .add(s.a3sg_su, s.p2sg, "yun")
        .add(s.a3sg_su, s.p3sg, "yu")
        .add(s.a3sg_su, s.p1pl, "yumuz")
        .add(s.a3sg_su, s.p2pl, "yunuz")
        .add(s.a3sg_su, s.p3pl, "lArI");

    // case
    let not_compound = Condition::not_have_root(CompoundP3sg);
    let compound = Condition::has_root(CompoundP3sg);
    let equ = Condition::previous_morpheme_is(m.a3pl).or(!Condition::contains_morpheme(&[m.adj]));
    b.add_empty_if(s.pnon, s.nom_st, no_family)
        .add_if(s.pnon, s.dat_st, "+yA", not_compound.clone())
        .add_if(s.pnon, s.abl_st, ">dAn", not_compound.clone())
        .add_if(s.pnon, s.loc_st, ">dA", not_compound.clone())
        .add_if(s.pnon, s.acc_st, "+yI", not_compound.clone())
        .add_if(s.pnon, s.gen_st, "+nIn", Condition::previous_state_is_not(s.a3sg_su))
        .add_if(s.pnon, s.gen_st, "yIn", Condition::previous_state_is(s.a3sg_su))
        .add_if(s.pnon, s.equ_st, ">cA", not_compound.and(equ.clone()))
        .add(s.pnon, s.ins_st, "+ylA");
    b.add_if(s.pnon, s.dat_st, "+nA", compound.clone())
        .add_if(s.pnon, s.abl_st, "+ndAn", compound.clone())
        .add_if(s.pnon, s.loc_st, "+ndA", compound.clone())
        .add_if(s.pnon, s.equ_st, "+ncA", compound.clone().and(equ.clone()))
        .add_if(s.pnon, s.acc_st, "+nI", compound);
    b.add_empty_if(s.pnon, s.dat_st, Condition::has_root(ImplicitDative));

    for p in [s.p1sg, s.p2sg, s.p1pl, s.p2pl] {
        b.add_empty(p, s.nom_st)
            .add(p, s.dat_st, "A")
            .add(p, s.loc_st, "dA")
            .add(p, s.abl_st, "dAn")
            .add(p, s.ins_st, "lA")
            .add(p, s.gen_st, "In")
            .add_if(p, s.equ_st, "cA", equ.clone())
            .add(p, s.acc_st, "I");
    }
    b.add_empty(s.p3sg, s.nom_st)
        .add(s.p3sg, s.dat_st, "nA")
        .add(s.p3sg, s.loc_st, "ndA")
        .add(s.p3sg, s.abl_st, "ndAn")
        .add(s.p3sg, s.ins_st, "ylA")
        .add(s.p3sg, s.gen_st, "nIn")
        .add_if(s.p3sg, s.equ_st, "ncA", equ)
        .add(s.p3sg, s.acc_st, "nI");
    b.add_empty(s.p3pl, s.nom_st)
        .add(s.p3pl, s.dat_st, "nA")
        .add(s.p3pl, s.loc_st, "ndA")
        .add(s.p3pl, s.abl_st, "ndAn")
        .add(s.p3pl, s.ins_st, "ylA")
        .add(s.p3pl, s.gen_st, "nIn")
        .add(s.p3pl, s.equ_st, "+ncA")
        .add(s.p3pl, s.acc_st, "nI");

    // diminutive: ev-cik, ev-ciğ-e, ev-ceğiz
    let dim = no_surface.and_not(abbreviation.clone());
    b.add_if(s.nom_st, s.dim, ">cI~k", dim.clone())
        .add_if(s.nom_st, s.dim, ">cI!ğ", dim.clone())
        .add_if(s.nom_st, s.dim, "cAğIz", dim);
    b.add_empty(s.dim, s.noun);

    let empty_adj_noun = Condition::ContainsMorphemeSequence(vec![m.adj, m.zero, m.noun, m.a3sg, m.pnon, m.nom]);
    let ness = group_empty
        .clone()
        .and_not(contains_ness)
        .and_not(empty_adj_noun)
        .and_not(abbreviation.clone());
    b.add_if(s.nom_st, s.ness, "lI~k", ness.clone())
        .add_if(s.nom_st, s.ness, "lI!ğ", ness);
    b.add_empty(s.ness, s.noun);

    b.add_if(
        s.nom_st,
        s.agt,
        ">cI",
        group_empty.clone().and_not(Condition::contains_morpheme(&[m.adj, m.agt])),
    );
    b.add_empty(s.agt, s.noun);

    // elma-ydı, elma-da-yım
    let to_verb = Condition::HasTail.and_not(
        group_empty
            .clone()
            .and(Condition::last_derivation_is(s.adj_zero_deriv)),
    );
    for case in [s.nom_st, s.dat_st, s.abl_st, s.loc_st, s.ins_st, s.gen_st] {
        b.add_empty_if(case, s.noun_zero_deriv, to_verb.clone());
    }
    b.add_empty(s.noun_zero_deriv, s.n_verb);

    // meyve-li, meyve-siz, meyve-msi, meyve-sel
    b.add_if(
        s.nom_st,
        s.with,
        "lI",
        group_empty
            .clone()
            .and_not(with_or_without)
            .and_not(abbreviation.clone()),
    );
    b.add_if(
        s.nom_st,
        s.without,
        "sIz",
        group_empty
            .clone()
            .and_not(Condition::contains_morpheme(&[m.with, m.without, m.inf1]))
            .and_not(abbreviation.clone()),
    );
    let just_like = group_empty
        .clone()
        .and_not(Condition::contains_morpheme(&[m.just_like, m.adj]))
        .and_not(abbreviation.clone());
    b.add_if(s.nom_st, s.just_like, "+msI", just_like.clone())
        .add_if(
            s.nom_st,
            s.just_like,
            "ImsI",
            Condition::not_have(PhoneticAttribute::LastLetterVowel).and(just_like),
        );
    b.add_if(
        s.nom_st,
        s.related,
        "sAl",
        group_empty
            .clone()
            .and_not(Condition::contains_morpheme(&[m.with, m.without, m.related]))
            .and_not(abbreviation.clone()),
    );
    for derived in [s.with, s.without, s.related, s.just_like] {
        b.add_empty(derived, s.adjective_root);
    }

    // meyve-de-ki
    let no_rel_repetition = !Condition::HasTailSequence(vec![m.rel, m.adj, m.zero, m.noun, m.a3sg, m.pnon, m.loc]);
    b.add_if(s.loc_st, s.rel, "ki", no_rel_repetition);
    b.add_empty(s.rel, s.adjective_root);

    let to_verb_derivation = group_empty
        .and_not(Condition::contains_morpheme(&[m.adj]))
        .and_not(Condition::contains_morpheme(&[m.inf1, m.inf2]))
        .and_not(abbreviation);
    b.add_if(s.nom_st, s.become_verb, "lAş", to_verb_derivation.clone())
        .add_if(s.nom_st, s.acquire, "lAn", to_verb_derivation);
    b.add_empty(s.become_verb, s.verb_root);
    b.add_empty(s.acquire, s.verb_root);

    // okumak: no plural, no possession, only a few cases
    b.add_empty(s.noun_inf1_root, s.a3sg_inf1);
    b.add_empty(s.a3sg_inf1, s.pnon_inf1);
    b.add_empty(s.pnon_inf1, s.nom_st)
        .add(s.pnon_inf1, s.abl_st, "tAn")
        .add(s.pnon_inf1, s.loc_st, "tA")
        .add(s.pnon_inf1, s.ins_st, "lA");
}

/// `içer-de`, `dışar-dan`: modified roots of words that drop their last vowel
/// before the locative and ablative.
fn connect_last_vowel_drop_words(b: &mut GraphBuilder, s: &States) {
    b.add_empty(s.noun_lvd_root, s.a3sg_lvd)
        .add(s.noun_lvd_root, s.a3pl_lvd, "lAr");
    b.add_empty(s.a3sg_lvd, s.pnon_lvd);
    b.add_empty(s.a3pl_lvd, s.pnon_lvd);
    b.add(s.pnon_lvd, s.loc_st, ">dA")
        .add(s.pnon_lvd, s.abl_st, ">dAn");
    b.add_empty(s.adj_lvd_root, s.zero_lvd);
    b.add_empty(s.zero_lvd, s.noun_lvd_root);
}

fn connect_proper_nouns_and_abbreviations(b: &mut GraphBuilder, s: &States) {
    for root in [s.noun_proper, s.noun_abbrv] {
        b.add_empty(root, s.a3sg).add(root, s.a3pl, "lAr");
    }
}

// ---------------------------------------------------------------------------
// Adjectives and numerals
// ---------------------------------------------------------------------------

fn connect_adjectives(b: &mut GraphBuilder, s: &States, m: &Morphemes) {
    let group_empty = Condition::NoSurfaceAfterDerivation;

    // yeşil-i: Adj→Zero→Noun, never without a suffix
    b.add_empty_if(s.adjective_root, s.adj_zero_deriv, Condition::HasTail);
    b.add_empty(s.adj_zero_deriv, s.noun)
        .add_empty(s.adj_zero_deriv, s.n_verb);

    let once = !Condition::contains_morpheme(&[m.as_if, m.ly, m.agt, m.with, m.just_like]);
    b.add(s.adjective_root, s.a_ly, ">cA");
    b.add_empty(s.a_ly, s.adv_root);
    b.add_if(s.adjective_root, s.a_as_if, ">cA", once.clone());
    b.add_empty(s.a_as_if, s.adjective_root);
    b.add_if(s.adjective_root, s.a_agt, ">cI", once);
    b.add_empty(s.a_agt, s.noun);

    let just_like = group_empty.clone().and_not(Condition::contains_morpheme(&[m.just_like]));
    b.add_if(s.adjective_root, s.just_like, "+msI", just_like.clone())
        .add_if(
            s.adjective_root,
            s.just_like,
            "ImsI",
            Condition::not_have(PhoneticAttribute::LastLetterVowel).and(just_like),
        )
        .add_if(s.adjective_root, s.become_verb, "lAş", group_empty.clone())
        .add_if(s.adjective_root, s.acquire, "lAn", group_empty)
        .add(s.adjective_root, s.ness, "lI~k")
        .add(s.adjective_root, s.ness, "lI!ğ");
}

fn connect_numerals(b: &mut GraphBuilder, s: &States, m: &Morphemes) {
    let just_like = Condition::NoSurfaceAfterDerivation.and_not(Condition::contains_morpheme(&[m.just_like]));
    b.add(s.numeral_root, s.ness, "lI~k")
        .add(s.numeral_root, s.ness, "lI!ğ")
        .add_empty_if(s.numeral_root, s.num_zero_deriv, Condition::HasTail)
        .add_if(s.numeral_root, s.just_like, "+msI", just_like.clone())
        .add_if(
            s.numeral_root,
            s.just_like,
            "ImsI",
            Condition::not_have(PhoneticAttribute::LastLetterVowel).and(just_like),
        );
    b.add_empty(s.num_zero_deriv, s.noun)
        .add_empty(s.num_zero_deriv, s.n_verb);
}

// ---------------------------------------------------------------------------
// Copular verb after nouns, adjectives and pronouns
// ---------------------------------------------------------------------------

fn connect_verb_after_nominals(b: &mut GraphBuilder, s: &States, m: &Morphemes) {
    b.add_empty(s.n_verb, s.n_present)
        .add(s.n_verb, s.n_past, "+y>dI")
        .add(s.n_verb, s.n_narr, "+ymIş")
        .add(s.n_verb, s.n_cond, "+ysA")
        .add(s.n_verb, s.v_while, "+yken");

    let degil = Condition::root_is("değil_Verb");

    let no_family = Condition::not_have_root(RootAttribute::FamilyMember);
    let verb_derived = Condition::contains_morpheme(&[m.inf1, m.inf2]);
    let after = |possessive: MorphemeId| Condition::ContainsMorphemeSequence(vec![possessive, m.nom]);
    let a1sg = no_family
        .clone()
        .and_not(after(m.p1sg))
        .and_not(verb_derived.clone());
    let a2sg = no_family
        .clone()
        .and_not(after(m.p2sg))
        .and_not(verb_derived.clone());
    let a3pl = no_family
        .clone()
        .and_not(Condition::PreviousGroupContains(vec![s.a3pl]))
        .and_not(after(m.p3pl))
        .and_not(verb_derived.clone());
    let a2pl = no_family
        .clone()
        .and_not(after(m.p2pl))
        .and_not(verb_derived.clone());
    let a1pl = no_family
        .and_not(after(m.p1sg))
        .and_not(after(m.p1pl))
        .and_not(verb_derived);
    let not_compound = Condition::not_have_root(RootAttribute::CompoundP3sg);

    b.add_if(s.n_present, s.n_a1sg, "+yIm", a1sg.clone())
        .add_if(s.n_present, s.n_a2sg, "sIn", a2sg.clone())
        .add_empty(s.n_present, s.n_a3sg)
        .add_empty_if(s.n_present, s.n_a3sg_st, degil)
        .add_if(
            s.n_present,
            s.n_a3pl,
            "lAr",
            not_compound
                .clone()
                .and_not(Condition::PreviousGroupContainsMorpheme(vec![m.inf1]))
                .and(a3pl.clone()),
        )
        .add_if(s.n_present, s.n_a1pl, "+yIz", a1pl.clone())
        .add_if(s.n_present, s.n_a2pl, "sInIz", a2pl.clone());

    b.add_if(s.n_past, s.n_a1sg, "m", a1sg.clone())
        .add_if(s.n_past, s.n_a2sg, "n", a2sg.clone())
        .add_if(s.n_past, s.n_a1pl, "k", a1pl.clone())
        .add_if(s.n_past, s.n_a2pl, "InIz", a2pl.clone())
        .add_if(s.n_past, s.n_a3pl, "lAr", not_compound.clone().and(a3pl.clone()))
        .add_empty(s.n_past, s.n_a3sg_st);

    b.add_if(s.n_narr, s.n_a1sg, "Im", a1sg.clone())
        .add_if(s.n_narr, s.n_a2sg, "sIn", a2sg.clone())
        .add_if(s.n_narr, s.n_a1pl, "Iz", a1pl.clone())
        .add_if(s.n_narr, s.n_a2pl, "sInIz", a2pl.clone())
        .add_if(s.n_narr, s.n_a3pl, "lAr", not_compound.and(a3pl))
        .add_empty(s.n_narr, s.n_a3sg_st)
        .add(s.n_narr, s.n_cond, "sA");

    b.add_if(s.n_cond, s.n_a1sg, "m", a1sg)
        .add_if(s.n_cond, s.n_a2sg, "n", a2sg)
        .add_if(s.n_cond, s.n_a1pl, "k", a1pl)
        .add_if(s.n_cond, s.n_a2pl, "nIz", a2pl)
        .add_empty(s.n_cond, s.n_a3sg_st)
        .add(s.n_cond, s.n_a3pl, "lAr");

    // elma-ydı-m-dır is not a word
    let copula = !Condition::current_group_contains_any(&[s.n_past, s.n_cond, s.n_cop_before_a3pl]);
    for person in [s.n_a1sg, s.n_a2sg, s.n_a1pl, s.n_a2pl, s.n_a3pl] {
        b.add_if(person, s.n_cop, "dIr", copula.clone());
    }
    b.add_if(s.n_a3sg, s.n_cop, ">dIr", copula);

    b.add(s.n_present, s.n_cop_before_a3pl, ">dIr");
    b.add(s.n_cop_before_a3pl, s.n_a3pl, "lAr");

    // değil carries its negation and then behaves like the copula
    b.add_empty_if(s.n_verb_degil, s.n_neg, Condition::root_is("değil_Verb"));
    b.copy_outgoing(s.n_verb, s.n_neg);
}

// ---------------------------------------------------------------------------
// Pronouns
// ---------------------------------------------------------------------------

const BEN: &str = "ben_Pron_Pers";
const SEN: &str = "sen_Pron_Pers";
const O: &str = "o_Pron_Pers";
const BIZ: &str = "biz_Pron_Pers";
const SIZ: &str = "siz_Pron_Pers";
const FALAN: &str = "falan_Pron_Pers";
const FALANCA: &str = "falanca_Pron_Pers";
const BU: &str = "bu_Pron_Demons";
const SU: &str = "şu_Pron_Demons";
const O_DEMONS: &str = "o_Pron_Demons";
const NE: &str = "ne_Pron_Ques";
const NERE: &str = "nere_Pron_Ques";
const KIM: &str = "kim_Pron_Ques";
const KENDI: &str = "kendi_Pron_Reflex";

const BIRBIRI: &str = "birbiri_Pron_Quant";
const BIRI: &str = "biri_Pron_Quant";
const BAZI: &str = "bazı_Pron_Quant";
const BIRCOGU: &str = "birçoğu_Pron_Quant";
const BIRKACI: &str = "birkaçı_Pron_Quant";
const BERIKI: &str = "beriki_Pron_Quant";
const COGU: &str = "çoğu_Pron_Quant";
const CUMLESI: &str = "cümlesi_Pron_Quant";
const HEP: &str = "hep_Pron_Quant";
const HERBIRI: &str = "herbiri_Pron_Quant";
const HERKES: &str = "herkes_Pron_Quant";
const HICBIRI: &str = "hiçbiri_Pron_Quant";
const HEPSI: &str = "hepsi_Pron_Quant";
const KIMI: &str = "kimi_Pron_Quant";
const KIMSE: &str = "kimse_Pron_Quant";
const OBURKU: &str = "öbürkü_Pron_Quant";
const OBURU: &str = "öbürü_Pron_Quant";
const TUMU: &str = "tümü_Pron_Quant";
const TOPU: &str = "topu_Pron_Quant";
const UMUM: &str = "umum_Pron_Quant";

fn connect_pronouns(b: &mut GraphBuilder, s: &States, m: &Morphemes) {
    use Condition as C;

    // personal
    b.add_empty_if(s.pron_pers, s.p_a1sg, C::root_is(BEN))
        .add_empty_if(s.pron_pers, s.p_a2sg, C::root_is(SEN))
        .add_empty_if(s.pron_pers, s.p_a3sg, C::root_is_any(&[O, FALAN, FALANCA]))
        .add_if(s.pron_pers, s.p_a3pl, "nlAr", C::root_is(O))
        .add_if(s.pron_pers, s.p_a3pl, "lAr", C::root_is_any(&[FALAN, FALANCA]))
        .add_empty_if(s.pron_pers, s.p_a1pl, C::root_is(BIZ))
        .add_if(s.pron_pers, s.p_a1pl, "lAr", C::root_is(BIZ))
        .add_empty_if(s.pron_pers, s.p_a2pl, C::root_is(SIZ))
        .add_if(s.pron_pers, s.p_a2pl, "lAr", C::root_is(SIZ));

    // ban-a, san-a
    b.add_empty_if(s.pron_pers_mod, s.p_a1sg_mod, C::root_is(BEN))
        .add_empty_if(s.pron_pers_mod, s.p_a2sg_mod, C::root_is(SEN));
    b.add_empty(s.p_a1sg_mod, s.p_pnon_mod);
    b.add_empty(s.p_a2sg_mod, s.p_pnon_mod);
    b.add(s.p_pnon_mod, s.p_dat, "A");

    for person in [s.p_a1sg, s.p_a2sg, s.p_a3sg, s.p_a1pl, s.p_a2pl, s.p_a3pl] {
        b.add_empty(person, s.p_pnon);
    }

    // demonstrative
    b.add_empty(s.pron_demons, s.p_a3sg)
        .add(s.pron_demons, s.p_a3pl, "nlAr");

    // quantitative
    b.add_empty_if(
        s.pron_quant,
        s.p_quant_a3sg,
        C::root_is_none(&[HERKES, UMUM, HEPSI, CUMLESI, HEP, TUMU, BIRKACI, TOPU]),
    )
    .add_if(
        s.pron_quant,
        s.p_quant_a3pl,
        "lAr",
        C::root_is_none(&[
            HEP, HEPSI, BIRKACI, UMUM, CUMLESI, COGU, BIRCOGU, HERBIRI, TUMU, HICBIRI, TOPU, OBURU,
        ]),
    )
    .add_if(s.pron_quant, s.p_quant_a1pl, "lAr", C::root_is(BAZI))
    .add_if(s.pron_quant, s.p_quant_a2pl, "lAr", C::root_is(BAZI))
    .add_empty_if(
        s.pron_quant,
        s.p_quant_a3pl,
        C::root_is_any(&[HERKES, UMUM, BIRKACI, HEPSI, CUMLESI, COGU, BIRCOGU, TUMU, TOPU]),
    )
    .add_empty_if(s.pron_quant, s.a3sg, C::root_is(KIMSE))
    .add_if(s.pron_quant, s.a3pl, "lAr", C::root_is(KIMSE));
    let plural_persons = [
        BIRI, BAZI, BIRBIRI, BIRKACI, HERBIRI, HEP, KIMI, COGU, BIRCOGU, TUMU, TOPU, HICBIRI,
    ];
    b.add_empty_if(s.pron_quant, s.p_quant_a1pl, C::root_is_any(&plural_persons))
        .add_empty_if(s.pron_quant, s.p_quant_a2pl, C::root_is_any(&plural_persons));

    // birbir-leri, çok-ları
    b.add_empty(s.pron_quant_modified, s.p_quant_mod_a3pl);
    b.add(s.p_quant_mod_a3pl, s.p_p3pl, "lArI");

    let unmodified = C::not_have(PhoneticAttribute::ModifiedPronoun);
    b.add_empty_if(
        s.p_quant_a3sg,
        s.p_p3sg,
        C::root_is_any(&[BIRI, BIRBIRI, KIMI, HERBIRI, HICBIRI, OBURU, OBURKU, BERIKI]).and(unmodified.clone()),
    )
    .add_if(
        s.p_quant_a3sg,
        s.p_p3sg,
        "sI",
        C::root_is_any(&[BIRI, BAZI, KIMI, BIRBIRI, HERBIRI, HICBIRI, OBURKU]).and(unmodified),
    );
    b.add_if(
        s.p_quant_a3pl,
        s.p_p3pl,
        "I",
        C::root_is_any(&[BIRI, BAZI, BIRBIRI, KIMI, OBURKU, BERIKI]),
    )
    .add_empty_if(
        s.p_quant_a3pl,
        s.p_p3pl,
        C::root_is_any(&[HEPSI, BIRKACI, CUMLESI, COGU, TUMU, TOPU, BIRCOGU]),
    )
    .add_empty_if(s.p_quant_a3pl, s.p_pnon, C::root_is_any(&[HERKES, UMUM, OBURKU, BERIKI]));
    b.add(s.p_quant_a1pl, s.p_p1pl, "ImIz");
    b.add(s.p_quant_a2pl, s.p_p2pl, "InIz");

    // question
    b.add_empty(s.pron_ques, s.p_ques_a3sg)
        .add(s.pron_ques, s.p_ques_a3pl, "lAr");
    b.add_empty(s.p_ques_a3sg, s.p_pnon)
        .add(s.p_ques_a3sg, s.p_p3sg, "+sI")
        .add_if(s.p_ques_a3sg, s.p_p1sg, "Im", C::root_is_not(NE))
        .add_if(s.p_ques_a3sg, s.p_p1sg, "yIm", C::root_is(NE))
        .add_if(s.p_ques_a3sg, s.p_p2sg, "In", C::root_is_not(NE))
        .add_if(s.p_ques_a3sg, s.p_p2sg, "yIn", C::root_is(NE))
        .add_if(s.p_ques_a3sg, s.p_p1pl, "ImIz", C::root_is_not(NE))
        .add_if(s.p_ques_a3sg, s.p_p1pl, "yImIz", C::root_is(NE));
    b.add_empty(s.p_ques_a3pl, s.p_pnon)
        .add(s.p_ques_a3pl, s.p_p3sg, "I")
        .add(s.p_ques_a3pl, s.p_p1sg, "Im")
        .add(s.p_ques_a3pl, s.p_p1pl, "ImIz");

    // reflexive
    for person in [
        s.p_reflex_a1sg,
        s.p_reflex_a2sg,
        s.p_reflex_a3sg,
        s.p_reflex_a1pl,
        s.p_reflex_a2pl,
        s.p_reflex_a3pl,
    ] {
        b.add_empty(s.pron_reflex, person);
    }
    b.add(s.p_reflex_a1sg, s.p_p1sg, "Im");
    b.add(s.p_reflex_a2sg, s.p_p2sg, "In");
    b.add(s.p_reflex_a3sg, s.p_p3sg, "+sI")
        .add_empty(s.p_reflex_a3sg, s.p_p3sg);
    b.add(s.p_reflex_a1pl, s.p_p1pl, "ImIz");
    b.add(s.p_reflex_a2pl, s.p_p2pl, "InIz");
    b.add(s.p_reflex_a3pl, s.p_p3pl, "lArI");

    // case: the n-group takes a buffer n, the y-group a buffer y
    let y_roots = [NE, NERE, FALAN, FALANCA, HEP, HERKES];
    let n_group = C::root_is_none(&y_roots);
    let y_group = C::root_is_any(&y_roots);

    b.add_empty(s.p_pnon, s.p_nom)
        .add_if(
            s.p_pnon,
            s.p_dat,
            "+nA",
            C::root_is_none(&[BEN, SEN, NE, NERE, FALAN, FALANCA, HERKES]),
        )
        .add_if(s.p_pnon, s.p_dat, "+yA", y_group.clone())
        .add_if(s.p_pnon, s.p_acc, "+nI", n_group.clone())
        .add_if(s.p_pnon, s.p_acc, "+yI", y_group.clone())
        .add_if(s.p_pnon, s.p_loc, "+ndA", n_group.clone())
        .add_if(s.p_pnon, s.p_loc, ">dA", y_group.clone())
        .add_if(s.p_pnon, s.p_abl, "+ndAn", n_group.clone())
        .add_if(s.p_pnon, s.p_abl, ">dAn", y_group.clone())
        .add_if(
            s.p_pnon,
            s.p_gen,
            "+nIn",
            n_group.clone().and(C::root_is_none(&[BIZ, BEN, SEN])),
        )
        .add_if(s.p_pnon, s.p_gen, "im", C::root_is_any(&[BEN, BIZ]))
        .add_if(s.p_pnon, s.p_gen, "in", C::root_is(SEN))
        .add_if(s.p_pnon, s.p_gen, "+yIn", y_group.clone().and(C::root_is_none(&[BIZ])))
        .add_if(s.p_pnon, s.p_equ, ">cA", y_group.clone())
        .add_if(s.p_pnon, s.p_equ, ">cA", n_group.clone())
        .add_if(s.p_pnon, s.p_ins, "+ylA", y_group.clone())
        .add_if(s.p_pnon, s.p_ins, "+nlA", n_group.clone())
        .add_if(
            s.p_pnon,
            s.p_ins,
            "+nInlA",
            n_group.clone().and(C::root_is_any(&[BU, SU, O, SEN])),
        )
        .add_if(s.p_pnon, s.p_ins, "inle", C::root_is(SIZ))
        .add_if(s.p_pnon, s.p_ins, "imle", C::root_is_any(&[BIZ, BEN]));

    let p1sg = C::root_is_any(&[KIM, BEN, NE, NERE, KENDI]);
    let p2sg = C::root_is_any(&[KIM, SEN, NE, NERE, KENDI]);
    let kendi = C::root_is(KENDI);
    for (state, restricted) in [(s.p_p1sg, p1sg), (s.p_p2sg, p2sg)] {
        b.add_empty(state, s.p_nom)
            .add_if(state, s.p_dat, "+nA", n_group.clone())
            .add_if(state, s.p_acc, "+nI", n_group.clone())
            .add_if(state, s.p_dat, "+yA", y_group.clone())
            .add_if(state, s.p_acc, "+yI", y_group.clone())
            .add_if(state, s.p_loc, "+ndA", kendi.clone())
            .add_if(state, s.p_abl, "+ndAn", kendi.clone())
            .add_if(state, s.p_equ, "+ncA", kendi.clone())
            .add_if(state, s.p_ins, "+nlA", restricted.clone())
            .add_if(state, s.p_gen, "+nIn", restricted);
    }

    let p3sg = C::root_is_any(&[
        KENDI, KIM, NE, NERE, O, BAZI, BIRI, BIRBIRI, HERBIRI, HEP, KIMI, HICBIRI,
    ]);
    b.add_empty(s.p_p3sg, s.p_nom)
        .add_if(s.p_p3sg, s.p_dat, "+nA", n_group.clone())
        .add_if(s.p_p3sg, s.p_acc, "+nI", n_group.clone())
        .add_if(s.p_p3sg, s.p_dat, "+yA", y_group.clone())
        .add_if(s.p_p3sg, s.p_acc, "+yI", y_group.clone())
        .add_if(s.p_p3sg, s.p_loc, "+ndA", p3sg.clone())
        .add_if(s.p_p3sg, s.p_abl, "+ndAn", p3sg.clone())
        .add_if(s.p_p3sg, s.p_gen, "+nIn", p3sg.clone())
        .add_if(s.p_p3sg, s.p_equ, "ncA", p3sg.clone())
        .add_if(s.p_p3sg, s.p_ins, "+ylA", p3sg);

    let plural_possessor = C::root_is_any(&[
        KENDI, KIM, NE, NERE, BIZ, SIZ, BIRI, BIRBIRI, BIRKACI, HERBIRI, HEP, KIMI, COGU, BIRCOGU, TUMU, TOPU,
        BAZI, HICBIRI,
    ]);
    for state in [s.p_p1pl, s.p_p2pl] {
        b.add_empty(state, s.p_nom)
            .add_if(state, s.p_dat, "+nA", n_group.clone())
            .add_if(state, s.p_acc, "+nI", n_group.clone())
            .add_if(state, s.p_dat, "+yA", y_group.clone())
            .add_if(state, s.p_acc, "+yI", y_group.clone())
            .add_if(state, s.p_loc, "+ndA", plural_possessor.clone())
            .add_if(state, s.p_abl, "+ndAn", plural_possessor.clone())
            .add_if(state, s.p_gen, "+nIn", plural_possessor.clone())
            .add_if(state, s.p_equ, "+ncA", plural_possessor.clone())
            .add_if(state, s.p_ins, "+nlA", plural_possessor.clone());
    }

    let p3pl = C::root_is_any(&[
        KENDI, KIM, NE, NERE, O, BAZI, BIRI, HERKES, UMUM, BIRKACI, HEPSI, CUMLESI, COGU, BIRCOGU, BIRBIRI, TUMU,
        KIMI, TOPU,
    ]);
    b.add_empty(s.p_p3pl, s.p_nom)
        .add_if(s.p_p3pl, s.p_dat, "+nA", n_group.clone())
        .add_if(s.p_p3pl, s.p_acc, "+nI", n_group)
        .add_if(s.p_p3pl, s.p_dat, "+yA", y_group.clone())
        .add_if(s.p_p3pl, s.p_acc, "+yI", y_group)
        .add_if(s.p_p3pl, s.p_loc, "+ndA", p3pl.clone())
        .add_if(s.p_p3pl, s.p_abl, "+ndAn", p3pl.clone())
        .add_if(s.p_p3pl, s.p_gen, "+nIn", p3pl.clone().or(C::root_is_any(&[SEN, SIZ])))
        .add_if(s.p_p3pl, s.p_equ, "+ncA", p3pl.clone())
        .add_if(s.p_p3pl, s.p_ins, "+ylA", p3pl);

    // ben-siz, ne-li, nere-de-ki
    let with_n = [BU, SU, O_DEMONS, BEN, SEN, O, BIZ, SIZ];
    b.add_if(s.p_nom, s.with, "+nlI", C::root_is_any(&with_n))
        .add_if(s.p_nom, s.with, "lI", C::root_is(NERE))
        .add_if(s.p_nom, s.with, "+ylI", C::root_is(NE))
        .add_if(
            s.p_nom,
            s.without,
            "+nsIz",
            C::root_is_any(&[NERE, BU, SU, O_DEMONS, BEN, SEN, O, BIZ, SIZ]),
        )
        .add_if(s.p_nom, s.without, "+ysIz", C::root_is(NE));
    b.add_if(
        s.p_gen,
        s.rel,
        "ki",
        C::root_is_any(&[NERE, BU, SU, O_DEMONS, NE, SEN, O, BIZ, SIZ]),
    );
    b.add_if(
        s.p_loc,
        s.rel,
        "ki",
        !C::HasTailSequence(vec![m.rel, m.adj, m.zero, m.noun, m.a3sg, m.pnon, m.loc]),
    );
    b.add(s.p_ins, s.v_while, "+yken");

    for case in [s.p_nom, s.p_dat, s.p_loc, s.p_abl, s.p_gen, s.p_ins] {
        b.add_empty_if(case, s.pron_zero_deriv, C::HasTail);
    }
    b.add_empty(s.pron_zero_deriv, s.n_verb);
}

// ---------------------------------------------------------------------------
// Adverbs, postpositions and closed classes
// ---------------------------------------------------------------------------

fn connect_adverbs_and_closed_classes(b: &mut GraphBuilder, s: &States) {
    // öyle-yim, böyle-ydi
    b.add_empty(s.adv_for_verb_deriv, s.av_zero_to_verb);
    b.add_empty(s.av_zero_to_verb, s.n_verb);

    b.add_empty(s.postp_root, s.postp_zero);
    b.add_empty(s.postp_zero, s.n_verb);
}

// ---------------------------------------------------------------------------
// Verbs
// ---------------------------------------------------------------------------

/// Person endings shared by several tenses: `(A1sg, A2sg, A1pl, A2pl, A3pl)`.
/// A3sg is always the empty ending.
fn persons(b: &mut GraphBuilder, s: &States, tense: StateId, endings: [&str; 5]) {
    let [a1sg, a2sg, a1pl, a2pl, a3pl] = endings;
    b.add(tense, s.v_a1sg, a1sg)
        .add(tense, s.v_a2sg, a2sg)
        .add_empty(tense, s.v_a3sg)
        .add(tense, s.v_a1pl, a1pl)
        .add(tense, s.v_a2pl, a2pl)
        .add(tense, s.v_a3pl, a3pl);
}

fn connect_verbs(b: &mut GraphBuilder, s: &States, m: &Morphemes) {
    use RootAttribute::*;

    // imperative
    b.add_empty(s.verb_root, s.v_imp);
    b.add_empty(s.v_imp, s.v_a2sg)
        .add(s.v_imp, s.v_a2sg, "sAnA")
        .add(s.v_imp, s.v_a3sg, "sIn")
        .add(s.v_imp, s.v_a2pl, "+yIn")
        .add(s.v_imp, s.v_a2pl, "+yInIz")
        .add(s.v_imp, s.v_a2pl, "sAnIzA")
        .add(s.v_imp, s.v_a3pl, "sInlAr");

    // causative: oku-t, yap-tır
    b.add_if(
        s.verb_root,
        s.v_caus_t,
        "t",
        Condition::has_root(Causative_t)
            .or(Condition::last_derivation_is(s.v_caus_tir))
            .and_not(Condition::last_derivation_is_any(&[s.v_caus_t, s.v_pass, s.v_able])),
    )
    .add_if(
        s.verb_root,
        s.v_caus_tir,
        ">dIr",
        Condition::has(PhoneticAttribute::LastLetterConsonant)
            .and_not(Condition::last_derivation_is_any(&[s.v_caus_tir, s.v_pass, s.v_able])),
    );
    b.add_empty(s.v_caus_t, s.verb_root);
    b.add_empty(s.v_caus_tir, s.verb_root);

    // progressive -Iyor; vowel-final roots reach it through their dropped form
    b.add_if(
        s.verb_root,
        s.v_prog_yor,
        "Iyor",
        Condition::not_have(PhoneticAttribute::LastLetterVowel),
    );
    b.add(s.verb_vowel_drop, s.v_prog_yor, "Iyor");
    persons(b, s, s.v_prog_yor, ["um", "sun", "uz", "sunuz", "lar"]);
    b.add(s.v_prog_yor, s.v_cond, "sa")
        .add(s.v_prog_yor, s.v_past_after_tense, "du")
        .add(s.v_prog_yor, s.v_narr_after_tense, "muş")
        .add(s.v_prog_yor, s.v_cop_before_a3pl, "dur")
        .add(s.v_prog_yor, s.v_while, "ken");

    // aorist
    b.add_if(
        s.verb_root,
        s.v_aor,
        "Ir",
        Condition::has_root(Aorist_I).or(Condition::HasAnySuffixSurface),
    )
    .add_if(
        s.verb_root,
        s.v_aor,
        "Ar",
        Condition::has_root(Aorist_A).and_not(Condition::HasAnySuffixSurface),
    );
    persons(b, s, s.v_aor, ["Im", "sIn", "Iz", "sInIz", "lAr"]);
    b.add(s.v_aor, s.v_past_after_tense, "dI")
        .add(s.v_aor, s.v_narr_after_tense, "mIş")
        .add(s.v_aor, s.v_cond, "sA")
        .add(s.v_aor, s.v_cop_before_a3pl, "dIr")
        .add(s.v_aor, s.v_while, "ken");

    // negative
    b.add_if(s.verb_root, s.v_neg, "mA", Condition::previous_morpheme_is_not(m.able));
    b.add_empty(s.v_neg, s.v_imp)
        .add(s.v_neg, s.v_past, "dI")
        .add(s.v_neg, s.v_fut, "yAcA~k")
        .add(s.v_neg, s.v_fut, "yAcA!ğ")
        .add(s.v_neg, s.v_narr, "mIş")
        .add(s.v_neg, s.v_opt, "yA")
        .add(s.v_neg, s.v_desr, "sA")
        .add(s.v_neg, s.v_neces, "mAlI")
        .add(s.v_neg, s.v_inf1, "mAk")
        .add(s.v_neg, s.v_inf2, "mA")
        .add(s.v_neg, s.v_able, "yAbil");

    // gel-m-iyor: the negative vowel drops before -Iyor
    b.add(s.verb_root, s.v_neg_prog1, "m");
    b.add(s.v_neg_prog1, s.v_prog_yor, "Iyor");

    // negative aorist: gel-mez, gel-me-m
    b.add(s.v_neg, s.v_aor_neg, "z")
        .add_empty(s.v_neg, s.v_aor_neg_empty);
    b.add(s.v_aor_neg, s.v_a2sg, "sIn")
        .add_empty(s.v_aor_neg, s.v_a3sg)
        .add(s.v_aor_neg, s.v_a2pl, "sInIz")
        .add(s.v_aor_neg, s.v_a3pl, "lAr")
        .add(s.v_aor_neg, s.v_past_after_tense, "dI")
        .add(s.v_aor_neg, s.v_narr_after_tense, "mIş")
        .add(s.v_aor_neg, s.v_cond, "sA")
        .add(s.v_aor_neg, s.v_cop_before_a3pl, "dIr")
        .add(s.v_aor_neg, s.v_while, "ken");
    b.add(s.v_aor_neg_empty, s.v_a1sg, "m")
        .add(s.v_aor_neg_empty, s.v_a1pl, "yIz");

    // ability
    b.add_if(
        s.verb_root,
        s.v_able,
        "+yAbil",
        !Condition::last_derivation_is(s.v_able),
    );
    b.add_empty(s.v_able, s.verb_root);

    // passive: oku-n, gel-in-il, yap-ıl
    let no_passive = !Condition::contains_morpheme(&[m.pass]);
    b.add_if(
        s.verb_root,
        s.v_pass,
        "In",
        Condition::has_root(Passive_In).and(no_passive.clone()),
    )
    .add_if(
        s.verb_root,
        s.v_pass,
        "InIl",
        Condition::has_root(Passive_In).and(no_passive.clone()),
    )
    .add_if(
        s.verb_root,
        s.v_pass,
        "+nIl",
        Condition::previous_state_is_any(&[s.v_caus_t, s.v_caus_tir])
            .or(Condition::not_have_root(Passive_In).and(no_passive)),
    );
    b.add_empty(s.v_pass, s.verb_root);

    // infinitives
    b.add(s.verb_root, s.v_inf1, "mA~k");
    b.add_empty(s.v_inf1, s.noun_inf1_root);
    b.add(s.verb_root, s.v_inf2, "mA");
    b.add_empty(s.v_inf2, s.noun);

    // condition after tense
    persons(b, s, s.v_cond, ["m", "n", "k", "nIz", "lAr"]);

    // past
    b.add(s.verb_root, s.v_past, ">dI");
    persons(b, s, s.v_past, ["m", "n", "k", "nIz", "lAr"]);
    b.add(s.v_past, s.v_cond, "ysA");

    // narrative
    b.add(s.verb_root, s.v_narr, "mIş");
    persons(b, s, s.v_narr, ["Im", "sIn", "Iz", "sInIz", "lAr"]);
    b.add(s.v_narr, s.v_cond, "sA")
        .add(s.v_narr, s.v_past_after_tense, "tI")
        .add(s.v_narr, s.v_cop_before_a3pl, "tIr")
        .add(s.v_narr, s.v_while, "ken")
        .add(s.v_narr, s.v_narr_after_tense, "mIş");

    persons(b, s, s.v_past_after_tense, ["m", "n", "k", "nIz", "lAr"]);
    persons(b, s, s.v_narr_after_tense, ["Im", "sIn", "Iz", "sInIz", "lAr"]);
    b.add(s.v_narr_after_tense, s.v_while, "ken")
        .add(s.v_narr_after_tense, s.v_cop_before_a3pl, "tIr");

    // future
    b.add(s.verb_root, s.v_fut, "+yAcA~k")
        .add(s.verb_root, s.v_fut, "+yAcA!ğ");
    persons(b, s, s.v_fut, ["Im", "sIn", "Iz", "sInIz", "lAr"]);
    b.add(s.v_fut, s.v_cond, "sA")
        .add(s.v_fut, s.v_past_after_tense, "tI")
        .add(s.v_fut, s.v_narr_after_tense, "mIş")
        .add(s.v_fut, s.v_cop_before_a3pl, "tIr")
        .add(s.v_fut, s.v_while, "ken");

    // demek, yemek: de-di, de-r, di-yor, di-yecek
    let di_yi = Condition::root_surface_is_any(&["di", "yi"]);
    let de_ye = Condition::root_surface_is_any(&["de", "ye"]);
    b.add_if(s.de_ye_root, s.v_fut, "yece~k", di_yi.clone())
        .add_if(s.de_ye_root, s.v_fut, "yece!ğ", di_yi.clone())
        .add_if(s.de_ye_root, s.v_prog_yor, "yor", di_yi.clone())
        .add_if(s.de_ye_root, s.v_able, "yebil", di_yi.clone())
        .add_if(s.de_ye_root, s.v_opt, "ye", di_yi);
    b.add_if(s.de_ye_root, s.v_caus_tir, "dir", de_ye.clone())
        .add_if(s.de_ye_root, s.v_pass, "n", de_ye.clone())
        .add_if(s.de_ye_root, s.v_pass, "nil", de_ye.clone())
        .add_if(s.de_ye_root, s.v_past, "di", de_ye.clone())
        .add_if(s.de_ye_root, s.v_narr, "miş", de_ye.clone())
        .add_if(s.de_ye_root, s.v_aor, "r", de_ye.clone())
        .add_if(s.de_ye_root, s.v_neg, "me", de_ye.clone())
        .add_if(s.de_ye_root, s.v_neg_prog1, "m", de_ye.clone())
        .add_if(s.de_ye_root, s.v_desr, "se", de_ye.clone())
        .add_if(s.de_ye_root, s.v_inf1, "mek", de_ye.clone())
        .add_if(s.de_ye_root, s.v_inf2, "me", de_ye.clone())
        .add_if(s.de_ye_root, s.v_neces, "meli", de_ye)
        .add_empty_if(s.de_ye_root, s.v_imp, Condition::root_surface_is("de"))
        .add_empty_if(s.de_ye_root, s.v_imp_ye, Condition::root_surface_is("ye"))
        .add_empty_if(s.de_ye_root, s.v_imp_yi, Condition::root_surface_is("yi"));
    b.add(s.v_imp_yi, s.v_a2pl, "yin")
        .add(s.v_imp_yi, s.v_a2pl, "yiniz");
    b.add_empty(s.v_imp_ye, s.v_a2sg)
        .add(s.v_imp_ye, s.v_a2sg, "sene")
        .add(s.v_imp_ye, s.v_a3sg, "sin")
        .add(s.v_imp_ye, s.v_a2pl, "senize")
        .add(s.v_imp_ye, s.v_a3pl, "sinler");

    // optative, desire, necessity
    b.add(s.verb_root, s.v_opt, "+yA");
    b.add(s.v_opt, s.v_a1sg, "yIm")
        .add(s.v_opt, s.v_a2sg, "sIn")
        .add_empty(s.v_opt, s.v_a3sg)
        .add(s.v_opt, s.v_a1pl, "lIm")
        .add(s.v_opt, s.v_a2pl, "sInIz")
        .add(s.v_opt, s.v_a3pl, "lAr")
        .add(s.v_opt, s.v_past_after_tense, "ydI")
        .add(s.v_opt, s.v_narr_after_tense, "ymIş");

    b.add(s.verb_root, s.v_desr, "sA");
    persons(b, s, s.v_desr, ["m", "n", "k", "nIz", "lAr"]);
    b.add(s.v_desr, s.v_past_after_tense, "ydI")
        .add(s.v_desr, s.v_narr_after_tense, "ymIş");

    b.add(s.verb_root, s.v_neces, "mAlI");
    persons(b, s, s.v_neces, ["yIm", "sIn", "yIz", "sInIz", "lAr"]);
    b.add(s.v_neces, s.v_past_after_tense, "ydI")
        .add(s.v_neces, s.v_cond, "ysA")
        .add(s.v_neces, s.v_narr_after_tense, "ymIş")
        .add(s.v_neces, s.v_cop_before_a3pl, "dIr")
        .add(s.v_neces, s.v_while, "yken");

    // copula after person: geliyor-dur, gelecek-tir
    let copula = Condition::previous_morpheme_is_any(&[m.prog1, m.neces, m.fut, m.narr, m.aor]);
    b.add_if(s.v_a3pl, s.v_cop, "dIr", copula.clone())
        .add_if(s.v_a3pl, s.v_while, "ken", copula.clone());
    for person in [s.v_a1sg, s.v_a2sg, s.v_a1pl, s.v_a2pl] {
        b.add_if(person, s.v_cop, "dIr", copula.clone());
    }
    b.add_if(s.v_a3sg, s.v_cop, ">dIr", copula);
    b.add(s.v_cop_before_a3pl, s.v_a3pl, "lAr");

    b.add_empty(s.v_while, s.adv_root);
}

// ---------------------------------------------------------------------------
// Question particle and imek
// ---------------------------------------------------------------------------

fn connect_question(b: &mut GraphBuilder, s: &States) {
    b.add_empty(s.question_root, s.q_present)
        .add(s.question_root, s.q_past, "ydI")
        .add(s.question_root, s.q_narr, "ymIş");

    b.add(s.q_present, s.q_a1sg, "yIm")
        .add(s.q_present, s.q_a2sg, "sIn")
        .add_empty(s.q_present, s.q_a3sg)
        .add(s.q_present, s.q_a1pl, "+yIz")
        .add(s.q_present, s.q_a2pl, "sInIz");

    b.add(s.q_past, s.q_a1sg, "m")
        .add(s.q_past, s.q_a2sg, "n")
        .add(s.q_past, s.q_a1pl, "k")
        .add(s.q_past, s.q_a2pl, "InIz")
        .add(s.q_past, s.q_a3pl, "lAr")
        .add_empty(s.q_past, s.q_a3sg);

    b.add(s.q_narr, s.q_a1sg, "Im")
        .add(s.q_narr, s.q_a2sg, "sIn")
        .add(s.q_narr, s.q_a1pl, "Iz")
        .add(s.q_narr, s.q_a2pl, "sInIz")
        .add(s.q_narr, s.q_a3pl, "lAr")
        .add_empty(s.q_narr, s.q_a3sg);

    let copula = !Condition::current_group_contains_any(&[s.q_past]);
    for person in [s.q_a1sg, s.q_a2sg, s.q_a1pl, s.q_a2pl] {
        b.add_if(person, s.q_cop, "dIr", copula.clone());
    }
    b.add_if(s.q_a3sg, s.q_cop, ">dIr", copula);
}

fn connect_imek(b: &mut GraphBuilder, s: &States) {
    b.add(s.imek_root, s.imek_past, "di")
        .add(s.imek_root, s.imek_narr, "miş")
        .add(s.imek_root, s.imek_cond, "se");

    b.add(s.imek_past, s.imek_a1sg, "m")
        .add(s.imek_past, s.imek_a2sg, "n")
        .add_empty(s.imek_past, s.imek_a3sg)
        .add(s.imek_past, s.imek_a1pl, "k")
        .add(s.imek_past, s.imek_a2pl, "niz")
        .add(s.imek_past, s.imek_a3pl, "ler")
        .add(s.imek_past, s.imek_cond, "yse");

    b.add(s.imek_narr, s.imek_a1sg, "im")
        .add(s.imek_narr, s.imek_a2sg, "sin")
        .add_empty(s.imek_narr, s.imek_a3sg)
        .add(s.imek_narr, s.imek_a1pl, "iz")
        .add(s.imek_narr, s.imek_a2pl, "siniz")
        .add(s.imek_narr, s.imek_a3pl, "ler")
        .add(s.imek_narr, s.imek_cond, "se");

    b.add(s.imek_cond, s.imek_a1sg, "m")
        .add(s.imek_cond, s.imek_a2sg, "n")
        .add_empty(s.imek_cond, s.imek_a3sg)
        .add(s.imek_cond, s.imek_a1pl, "k")
        .add(s.imek_cond, s.imek_a2pl, "niz")
        .add(s.imek_cond, s.imek_a3pl, "ler");

    let copula = !Condition::current_group_contains_any(&[s.imek_past]);
    for person in [s.imek_a1sg, s.imek_a2sg, s.imek_a1pl, s.imek_a2pl, s.imek_a3pl] {
        b.add_if(person, s.imek_cop, "dir", copula.clone());
    }
    b.add_if(s.imek_a3sg, s.imek_cop, "tir", copula);
}

/// Connections that copy from already connected states.
fn connect_post_processing(b: &mut GraphBuilder, s: &States, m: &Morphemes) {
    // kavr-ul is passive; kavur-ul is not
    b.add(s.verb_lvd_mod, s.v_pass, "Il");
    b.copy_outgoing(s.verb_root, s.verb_lvd_unmod)
        .remove_transitions_to_morpheme(s.verb_lvd_unmod, m.pass);
}

#[cfg(test)]
mod tests {
    use super::*;
    use turkmorph_core::phonetics::attributes_of;

    fn item(lemma: &str, pos: PrimaryPos, spos: SecondaryPos, attrs: Vec<RootAttribute>) -> DictionaryItem {
        DictionaryItem::new(lemma, lemma, lemma, pos, spos, attrs)
    }

    fn state_name(t: &TurkishMorphotactics, item: &DictionaryItem, attrs: PhoneticAttributes) -> String {
        t.graph().state(t.root_state(item, attrs)).id.clone()
    }

    #[test]
    fn graph_builds() {
        let t = TurkishMorphotactics::new().unwrap();
        assert!(t.graph().state_count() > 150);
        assert!(t.graph().transition_count() > t.graph().state_count());
        assert!(t.state("noun_S").is_some());
        assert!(t.state("vDeYeRoot_S").is_some());
        assert!(t.graph().state(t.state("nom_ST").unwrap()).terminal);
        assert!(!t.graph().state(t.state("a3sg_S").unwrap()).terminal);
        assert!(t.graph().state(t.state("dim_S").unwrap()).derivative);
    }

    #[test]
    fn root_state_by_pos() {
        let t = TurkishMorphotactics::new().unwrap();
        let none = SecondaryPos::None;
        let kitap = item("kitap", PrimaryPos::Noun, none, vec![]);
        assert_eq!(state_name(&t, &kitap, attributes_of("kitap")), "noun_S");
        let ankara = item("Ankara", PrimaryPos::Noun, SecondaryPos::ProperNoun, vec![]);
        assert_eq!(state_name(&t, &ankara, attributes_of("ankara")), "nounProper_S");
        let mavi = item("mavi", PrimaryPos::Adjective, none, vec![]);
        assert_eq!(state_name(&t, &mavi, attributes_of("mavi")), "adjectiveRoot_ST");
        let ben = item("ben", PrimaryPos::Pronoun, SecondaryPos::PersonalPron, vec![]);
        assert_eq!(state_name(&t, &ben, attributes_of("ben")), "pronPers_S");
        let gel = DictionaryItem::new("gelmek", "gel", "gel", PrimaryPos::Verb, none, vec![]);
        assert_eq!(state_name(&t, &gel, attributes_of("gel")), "verbRoot_S");
        let ve = item("ve", PrimaryPos::Conjunction, none, vec![]);
        assert_eq!(state_name(&t, &ve, attributes_of("ve")), "conjRoot_ST");
    }

    #[test]
    fn special_items_and_dropped_roots() {
        let t = TurkishMorphotactics::new().unwrap();
        let none = SecondaryPos::None;
        let su = item("su", PrimaryPos::Noun, none, vec![]);
        assert_eq!(state_name(&t, &su, attributes_of("su")), "nounSuRoot_S");
        let degil = item("değil", PrimaryPos::Verb, none, vec![]);
        assert_eq!(state_name(&t, &degil, attributes_of("değil")), "nVerbDegil_S");
        let ara = DictionaryItem::new("aramak", "ara", "ara", PrimaryPos::Verb, none, vec![]);
        let dropped = attributes_of("ar").with(PhoneticAttribute::LastLetterDropped);
        assert_eq!(state_name(&t, &ara, dropped), "verbRoot_VowelDrop_S");
        let compound = item("zeytinyağ", PrimaryPos::Noun, none, vec![RootAttribute::CompoundP3sgRoot]);
        assert_eq!(state_name(&t, &compound, attributes_of("zeytinyağ")), "nounCompoundRoot_S");
        let kendi = item("kendi", PrimaryPos::Pronoun, SecondaryPos::ReflexivePron, vec![]);
        assert_eq!(state_name(&t, &kendi, attributes_of("kendi")), "pronReflex_S");
    }

    #[test]
    fn unmodified_lvd_root_has_no_passive() {
        let t = TurkishMorphotactics::new().unwrap();
        let g = t.graph();
        let unmod = t.state("verbLastVowelDropUnmodRoot_S").unwrap();
        let root = t.state("verbRoot_S").unwrap();
        assert!(g.outgoing(unmod).all(|tr| g.state_morpheme(tr.to).id != "Pass"));
        assert!(g.outgoing(root).any(|tr| g.state_morpheme(tr.to).id == "Pass"));
        let passives = g.outgoing(root).filter(|tr| g.state_morpheme(tr.to).id == "Pass").count();
        assert_eq!(g.state(unmod).outgoing().len() + passives, g.state(root).outgoing().len());
    }

    #[test]
    fn genitive_and_become_states() {
        let t = TurkishMorphotactics::new().unwrap();
        let g = t.graph();
        let gen_st = t.state("gen_ST").unwrap();
        let become_s = t.state("become_S").unwrap();
        assert_eq!(g.state_morpheme(gen_st).id, "Gen");
        assert_eq!(g.state_morpheme(become_s).id, "Become");
        assert!(g.state(become_s).derivative);
        let adj = t.state("adjectiveRoot_ST").unwrap();
        assert!(g.outgoing(adj).any(|tr| tr.to == become_s));
    }

    #[test]
    fn degil_negation_copies_copula() {
        let t = TurkishMorphotactics::new().unwrap();
        let g = t.graph();
        let n_verb = t.state("nVerb_S").unwrap();
        let n_neg = t.state("nNeg_S").unwrap();
        assert_eq!(g.state(n_neg).outgoing().len(), g.state(n_verb).outgoing().len());
    }
}
