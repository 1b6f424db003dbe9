//! Prompt construction for the legal assistant endpoints

/// 2-3 sentence case-file summary from the case's key fields.
pub fn case_summary(title: &str, case_type: &str, court: &str, description: &str) -> String {
    format!(
        "You are an expert legal assistant. Summarize the following case description into a \
         concise, 2-3 sentence summary suitable for a case file.\n\n\
         Case Title: {title}\n\
         Case Type: {case_type}\n\
         Court: {court}\n\
         Description: {description}\n\n\
         Generate only the summary text."
    )
}

/// Research prompt asking for 3-5 precedents as a bare JSON array.
///
/// The model is told not to wrap the array in markdown fences; it often does
/// anyway, which is why [`crate::parse::strip_code_fences`] exists.
pub fn similar_cases(title: &str, case_type: &str, description: &str) -> String {
    format!(
        "You are a legal research assistant. Find 3-5 similar Indian legal cases to the \
         following:\n\
         Case Title: {title}\n\
         Case Type: {case_type}\n\
         Description: {description}\n\n\
         Your response MUST be a valid JSON array of objects, and nothing else.\n\
         Do not include markdown ```json``` tags or any explanatory text.\n\n\
         The JSON format for each object must be:\n\
         {{\n\
           \"caseTitle\": \"The full case title\",\n\
           \"citation\": \"The official citation\",\n\
           \"verdict\": \"A one-sentence summary of the verdict or key ruling.\"\n\
         }}\n\n\
         Example of a perfect response:\n\
         [\n\
           {{\"caseTitle\": \"Kesavananda Bharati v. State of Kerala\", \"citation\": \"(1973) 4 SCC 225\", \"verdict\": \"The Supreme Court held that Parliament cannot alter the basic structure of the Constitution.\"}},\n\
           {{\"caseTitle\": \"Maneka Gandhi v. Union of India\", \"citation\": \"AIR 1978 SC 597\", \"verdict\": \"The Court held that the 'procedure established by law' under Article 21 must be fair, just, and reasonable.\"}}\n\
         ]"
    )
}
