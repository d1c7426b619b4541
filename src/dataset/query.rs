use crate::dataset::models::DatasetSource;

const WIKIDATA_QUERY: &str = r#"
PREFIX wd: <http://www.wikidata.org/entity/>
PREFIX wdt: <http://www.wikidata.org/prop/direct/>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX p: <http://www.wikidata.org/prop/>
PREFIX ps: <http://www.wikidata.org/prop/statement/>
PREFIX pq: <http://www.wikidata.org/prop/qualifier/>
PREFIX wikibase: <http://wikiba.se/ontology#>

SELECT DISTINCT ?country_label ?capital_label ?currency_label ?population
                ?flag_image ?determination_method_label ?anthem_audio
WHERE {
  ?country wdt:P31 wd:Q3624078 .
  FILTER NOT EXISTS { ?country wdt:P31 wd:Q3024240 }
  FILTER NOT EXISTS { ?country wdt:P31 wd:Q28171280 }
  OPTIONAL { ?country wdt:P36 ?capital } .
  OPTIONAL {
    ?country p:P36 ?capitalStatement .
    ?capitalStatement ps:P36 ?capital .
    ?capitalStatement pq:P459 ?determination_method .
    ?determination_method rdfs:label ?determination_method_label .
    FILTER (LANG(?determination_method_label) = "en")
  } .
  OPTIONAL { ?country wdt:P38 ?currency } .
  OPTIONAL { ?country wdt:P1082 ?population } .
  OPTIONAL {
    ?country p:P41 ?flagStatement .
    ?flagStatement ps:P41 ?flag_image .
    ?flagStatement wikibase:rank wikibase:PreferredRank .
    FILTER NOT EXISTS { ?flagStatement pq:P582 ?endTime . }
  } .
  OPTIONAL {
    ?country wdt:P85 ?anthem .
    ?anthem wdt:P51 ?anthem_audio .
  } .
  SERVICE wikibase:label {
    ?country rdfs:label ?country_label .
    ?capital rdfs:label ?capital_label .
    ?currency rdfs:label ?currency_label .
    bd:serviceParam wikibase:language "en" .
  }
}
"#;

const DBPEDIA_QUERY: &str = r#"
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX dbo: <http://dbpedia.org/ontology/>
PREFIX dbp: <http://dbpedia.org/property/>
PREFIX dbc: <http://dbpedia.org/resource/Category:>
PREFIX dct: <http://purl.org/dc/terms/>

SELECT ?country_label ?capital_label ?currency_label ?population ?flag_image WHERE {
  ?country rdf:type dbo:Country ;
    dct:subject dbc:Member_states_of_the_United_Nations .
  ?country rdfs:label ?country_label .
  OPTIONAL { ?country dbp:capital ?capital . ?capital rdfs:label ?capital_label .
             FILTER (LANG(?capital_label) = "en") }
  OPTIONAL { ?country dbp:currency ?currency . ?currency rdfs:label ?currency_label .
             FILTER (LANG(?currency_label) = "en") }
  OPTIONAL { ?country dbp:populationEstimate ?population . }
  OPTIONAL { ?country dbo:thumbnail ?flag_image . }
  FILTER (LANG(?country_label) = "en")
}
"#;

pub fn country_query(source: DatasetSource) -> &'static str {
    match source {
        DatasetSource::Wikidata => WIKIDATA_QUERY,
        DatasetSource::Dbpedia => DBPEDIA_QUERY,
    }
}
