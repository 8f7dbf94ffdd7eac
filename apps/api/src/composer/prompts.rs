// User-message templates. The system message is always the template file text,
// sent verbatim; only the user message is built here.

/// Marker line placed before and after every embedded block of caller data.
pub const DELIMITER: &str = "---";

/// File names of the instruction templates inside the prompts directory.
pub const LETTER_TEMPLATE_FILE: &str = "prompt_lettre_motivation.txt";
pub const RECOMMENDATIONS_TEMPLATE_FILE: &str = "prompt_recommandations_cv.txt";

pub const LETTER_CV_INTRO: &str = "Voici le CV du candidat (texte extrait) :";
pub const LETTER_CONTEXT_INTRO: &str = "Contexte / offre / instructions pour la lettre :";
pub const LETTER_CLOSING: &str = "Rédige la lettre de motivation en";

pub const RECOMMENDATIONS_CV_INTRO: &str = "Voici le CV à analyser (texte extrait) :";
pub const RECOMMENDATIONS_CLOSING: &str = "Rédige tes recommandations d'amélioration en";
